use crate::paths::dir_name;
use crate::suite::Suite;
use crate::tree::{build_pathnames_tree, PathNode, ROOT_NAME};
use std::collections::HashMap;

fn skeleton_suite(node: &PathNode) -> Suite {
    let mut suite = Suite::with_origin(node.name.as_str());
    suite.suites = node.children.iter().map(skeleton_suite).collect();
    suite
}

/// Directory-only suite tree for the origins of `suites`. No file suites
/// are attached yet.
pub fn generate_suite_tree(suites: &[Suite]) -> Suite {
    let origins: Vec<&str> = suites.iter().map(|s| s.origin.as_str()).collect();
    let tree = build_pathnames_tree(&origins);
    let mut root = Suite::with_origin(ROOT_NAME);
    root.suites = tree.children.iter().map(skeleton_suite).collect();
    root
}

type SuitesByDir<'a> = HashMap<&'a str, Vec<&'a Suite>>;

fn suites_by_dir(suites: &[Suite]) -> SuitesByDir<'_> {
    let mut by_dir: SuitesByDir<'_> = HashMap::new();
    for suite in suites {
        let dir = dir_name(&suite.origin).unwrap_or("");
        by_dir.entry(dir).or_default().push(suite);
    }
    by_dir
}

fn join_dir(dir: &str, name: &str) -> String {
    if dir.is_empty() { name.to_string() } else { format!("{dir}/{name}") }
}

/// `siblings` all live in `dir`. Each directory node is filled first, then
/// the file suites sitting directly in `dir` are appended after them.
fn graft(siblings: &mut Vec<Suite>, dir: &str, by_dir: &SuitesByDir<'_>) {
    for node in siblings.iter_mut() {
        let node_dir = join_dir(dir, &node.name);
        graft(&mut node.suites, &node_dir, by_dir);
    }
    if let Some(files) = by_dir.get(dir) {
        siblings.extend(files.iter().map(|s| s.renamed_to_origin()));
    }
}

/// Merge per-source suites into one tree shaped like their directories.
///
/// Every input suite shows up exactly once, as a copy named after its
/// origin, under the node of its directory. Suites without a directory go
/// straight under the root. The inputs are left untouched.
pub fn group_suites(suites: &[Suite]) -> Suite {
    let mut root = generate_suite_tree(suites);
    let by_dir = suites_by_dir(suites);
    graft(&mut root.suites, "", &by_dir);
    root
}
