use std::fmt;

/// Lifecycle of the map page.
///
/// `Locked` until the map has loaded and offers arrived, `Loaded` after the
/// first render, `Filtering` once any filter change has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    #[default]
    Locked,
    Loaded,
    Filtering,
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageState::Locked => "locked",
            PageState::Loaded => "loaded",
            PageState::Filtering => "filtering",
        };
        f.write_str(name)
    }
}
