//! Directory classification for a set of origins.
//!
//! Origins are split on `/` only. A URL such as `http://host/a/b.js` is
//! just another path whose directory is `http://host/a`.

use itertools::Itertools;

/// Everything before the last `/`, or `None` when the origin has no
/// directory part (bare filenames, or a blank directory).
pub fn dir_name(origin: &str) -> Option<&str> {
    let idx = origin.rfind('/')?;
    let dir = &origin[..idx];
    if dir.trim().is_empty() { None } else { Some(dir) }
}

/// True when `path` lies strictly below `dir`.
pub fn is_under(path: &str, dir: &str) -> bool {
    path.len() > dir.len() && path.starts_with(dir) && path.as_bytes()[dir.len()] == b'/'
}

/// Distinct directories of all origins, in ascending byte order.
pub fn distinct_dirs<S: AsRef<str>>(origins: &[S]) -> Vec<&str> {
    origins
        .iter()
        .filter_map(|o| dir_name(o.as_ref()))
        .sorted()
        .dedup()
        .collect()
}

/// Directories that are not nested under any other directory of the set.
pub fn find_roots<S: AsRef<str>>(origins: &[S]) -> Vec<String> {
    let dirs = distinct_dirs(origins);
    dirs.iter()
        .filter(|d| !dirs.iter().any(|other| is_under(d, other)))
        .map(|d| d.to_string())
        .collect()
}

/// One segment list per distinct directory: the owning root first, then
/// the remaining components below it. Roots are never split, so
/// directories without any branching collapse into a single segment.
pub fn split_out_pathnames<S: AsRef<str>>(origins: &[S]) -> Vec<Vec<String>> {
    let roots = find_roots(origins);
    distinct_dirs(origins)
        .into_iter()
        .map(|path| {
            let root = roots.iter().find(|r| r.as_str() == path || is_under(path, r));
            match root {
                Some(root) if root.as_str() != path => {
                    let rest = &path[root.len() + 1..];
                    std::iter::once(root.clone())
                        .chain(rest.split('/').map(str::to_string))
                        .collect()
                }
                _ => vec![path.to_string()],
            }
        })
        .collect()
}
