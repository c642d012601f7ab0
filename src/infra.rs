pub mod dataset;
pub mod export;

#[cfg(feature = "proptest")]
pub mod proptest;
