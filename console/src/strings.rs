macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod convert {
    define_strings! {
        ABOUT =
            "Convert a raw DREAMing melt peak table into a methylation density \
            table (numU, numM, MD and one column per sample). Requires a \
            temperature to density calibration table and the number of CpGs \
            of the locus.";
        DATA =
            "CSV with the raw DREAMing melting peak temperatures. The first \
            column labels rows: well numbers 1..N hold one melt peak per cell, \
            other labels (copies_loaded, plate, date, ...) are metadata rows. \
            Each sample has a <sample>_L and a <sample>_H column for the lower \
            and higher melting peak; replicate assays add a .1, .2, ... suffix.";
        TEMPS =
            "CSV with 'temp' and 'MD' columns mapping melting peak temperature \
            to methylation density for the locus. Every temperature in the raw \
            table must be listed.";
        CPGS =
            "Number of CpGs covered by the DREAMing locus, as used to calibrate \
            its melting temperatures.";
        BG =
            "Include the loaded genomic equivalents (copies_loaded) as \
            background fragments with a methylation density of 0.";
        POIS =
            "Adjust the melt peak counts of each sample assay for multiple \
            template loading with a Poisson model.";
        TM =
            "Melting temperature resolution of the melt peaks. Typically 0.2C, \
            but depends on the thermocycler used.";
        INFO =
            "Comma separated list of rows carried into the melt peak counts \
            table. 'Sample' and 'copies_loaded' are always useful; other \
            metadata rows (plate, date, ...) may be added.";
        COUNT_FILE =
            "Also write the melt peak counts table (one row per sample, one \
            column per melting temperature).";
        OUT =
            "Directory for the output tables and the run log. Defaults to the \
            working directory.";
    }
}

pub mod validate {
    define_strings! {
        ABOUT =
            "Check a raw DREAMing table against a calibration table and report \
            the run summary without writing any file.";
    }
}

pub mod utils {
    define_strings! {
        THREADS =
            "Number of threads for per-sample aggregation. Defaults to the \
            DREAMING_NUM_THREADS environment variable or all cores.";
        VERBOSE = "Log per-sample details.";
    }
}
