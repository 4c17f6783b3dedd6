use std::time::Duration;

use similar::{ChangeTag, TextDiff};

/// Past this the diff gives up on finding the smallest edit and settles
/// for a coarser one.
const DEADLINE: Duration = Duration::from_millis(200);

/// Line diff between two renderings, `-` for `expected` and `+` for
/// `actual`.
pub(crate) fn lines(expected: &str, actual: &str) -> String {
    let diff = TextDiff::configure()
        .timeout(DEADLINE)
        .diff_lines(expected, actual);

    diff.iter_all_changes()
        .map(|change| {
            let marker = match change.tag() {
                ChangeTag::Equal => "  ",
                ChangeTag::Delete => "- ",
                ChangeTag::Insert => "+ ",
            };
            format!("{}{}", marker, change.value().trim_end_matches('\n'))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
