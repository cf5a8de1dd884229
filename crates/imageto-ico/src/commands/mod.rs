pub mod batch;
pub mod convert;
pub mod info;
pub mod inspect;

use imageto_ico_core::IconSize;

/// A parsed `--sizes` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeList(Vec<IconSize>);

impl SizeList {
    pub fn into_inner(self) -> Vec<IconSize> {
        self.0
    }
}

pub fn parse_size_list(s: &str) -> Result<SizeList, String> {
    imageto_ico_core::parse_sizes(s)
        .map(SizeList)
        .map_err(|e| e.to_string())
}

/// `16x, 32x, 48x` as the original tool prints size lists.
pub fn format_sizes(sizes: &[IconSize]) -> String {
    sizes
        .iter()
        .map(|s| format!("{}x", s.get()))
        .collect::<Vec<_>>()
        .join(", ")
}
