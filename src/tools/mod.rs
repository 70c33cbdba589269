//! The conversion stages, in the order a run applies them.
//!
//! - [`load`]: validates the raw table against the calibration table and
//!   derives the sample list and the temperature bins of the observed range.
//! - [`aggregate`]: counts melt peaks per sample and temperature bin, with
//!   optional Poisson correction, and gathers the requested metadata.
//! - [`density`]: relabels temperature bins as methylation densities and
//!   pools bins sharing a density.
//! - [`assemble`]: attaches the numU/numM sequence and builds the output
//!   tables.
//! - [`pipeline`]: the run configuration and the linear run itself.
pub mod aggregate;
pub mod assemble;
pub mod density;
pub mod load;
pub mod pipeline;
