use std::path::{
    Path,
    PathBuf,
};

use chrono::NaiveDate;

const TABLE_PREFIX: &str = "convertRawDREAMingToMethDensTable";
const COUNTS_PREFIX: &str = "plasmaMeltPeakCounts";

/// File names of one conversion run.
///
/// Names embed the raw table's base name, the Poisson and background flags
/// and the creation date, e.g.
/// `convertRawDREAMingToMethDensTable.20190211-DREAMing.poisAdj=FALSE.input2bg=TRUE.Created=2019-02-11.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    dir:        PathBuf,
    input_name: String,
    poisson:    bool,
    background: bool,
    created:    NaiveDate,
}

fn flag(value: bool) -> &'static str {
    if value {
        "TRUE"
    }
    else {
        "FALSE"
    }
}

impl OutputNaming {
    pub fn new<P: AsRef<Path>>(
        raw_path: P,
        out_dir: Option<PathBuf>,
        poisson: bool,
        background: bool,
        created: NaiveDate,
    ) -> Self {
        Self {
            dir: out_dir.unwrap_or_default(),
            input_name: Self::input_name(raw_path.as_ref()),
            poisson,
            background,
            created,
        }
    }

    /// `20190211-DREAMing_well_melt_temps_raw.csv` becomes `20190211-DREAMing`.
    pub fn input_name(raw_path: &Path) -> String {
        let file_name = raw_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        file_name
            .split('_')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    fn flags(&self) -> String {
        format!(
            "{}.poisAdj={}.input2bg={}",
            self.input_name,
            flag(self.poisson),
            flag(self.background)
        )
    }

    /// Shared stem of the density table and the run log.
    pub fn tag(&self) -> PathBuf {
        self.dir.join(format!(
            "{TABLE_PREFIX}.{}.Created={}",
            self.flags(),
            self.created.format("%Y-%m-%d")
        ))
    }

    pub fn density_table(&self) -> PathBuf {
        self.tag().with_extension_str("csv")
    }

    pub fn run_log(&self) -> PathBuf {
        self.tag().with_extension_str("log")
    }

    pub fn melt_peak_counts(&self) -> PathBuf {
        self.dir.join(format!(
            "{COUNTS_PREFIX}.{}_Created={}.csv",
            self.flags(),
            self.created.format("%Y-%m-%d")
        ))
    }
}

/// Appends an extension without replacing the dotted parts of the stem.
trait AppendExtension {
    fn with_extension_str(
        &self,
        extension: &str,
    ) -> PathBuf;
}

impl AppendExtension for PathBuf {
    fn with_extension_str(
        &self,
        extension: &str,
    ) -> PathBuf {
        let mut name = self.as_os_str().to_os_string();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}
