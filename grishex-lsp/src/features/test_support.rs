use grishex_config::{load_defaults, GrishexConfig};
use grishex_lexer::testing::SAMPLE_CONTRACT;
use grishex_lexer::{scan, Scan};

pub(crate) fn sample_source() -> &'static str {
    SAMPLE_CONTRACT
}

pub(crate) fn sample_scan() -> Scan {
    scan(SAMPLE_CONTRACT)
}

pub(crate) fn default_config() -> GrishexConfig {
    load_defaults().expect("embedded defaults to deserialize")
}
