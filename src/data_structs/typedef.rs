/// Melting temperature in degrees Celsius.
pub type TempType = f64;
/// Methylation density, the methylated fraction of the locus CpGs.
pub type DensityType = f64;
/// Fragment count. Fractional only while Poisson adjusted or halved.
pub type CountType = f64;
/// Number of CpG sites in a locus.
pub type CpgType = u32;
