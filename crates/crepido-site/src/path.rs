//! Request path to board file resolution.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Board served for the root path.
pub const INDEX_BOARD: &str = "index";

/// Map a request path to a board file under `boards_dir`.
///
/// The path is percent-decoded and stripped of its leading `/`; an empty path
/// maps to [`INDEX_BOARD`]. The `.{extension}` suffix is appended unless the
/// path already mentions it. Paths that would leave `boards_dir` (`..`,
/// absolute or prefixed components) resolve to `None`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use crepido_site::resolve_board_path;
///
/// let boards = Path::new("boards");
/// assert_eq!(
///     resolve_board_path(boards, "/team/sprint", "md"),
///     Some(boards.join("team/sprint.md"))
/// );
/// assert_eq!(resolve_board_path(boards, "/../secret", "md"), None);
/// ```
pub fn resolve_board_path(boards_dir: &Path, request_path: &str, extension: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let relative = decoded.trim_start_matches('/');
    let relative = if relative.is_empty() {
        INDEX_BOARD
    } else {
        relative
    };

    let suffix = format!(".{extension}");
    let file = if relative.contains(&suffix) {
        relative.to_owned()
    } else {
        format!("{relative}{suffix}")
    };

    let file = Path::new(&file);
    if !file
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }

    Some(boards_dir.join(file))
}
