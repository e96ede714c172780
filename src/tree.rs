use crate::paths::split_out_pathnames;
use std::collections::HashMap;

pub const ROOT_NAME: &str = "root";

/// One directory segment. A segment may span several real directory levels
/// (`"dirA/dirB"`) when nothing branches between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNode {
    pub name: String,
    pub children: Vec<PathNode>,
}

impl PathNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: Vec::new() }
    }
}

/// Arena-backed builder; nodes are addressed by index and memoized by the
/// full cumulative path of segments leading to them.
struct TreeBuilder {
    names: Vec<String>,
    children: Vec<Vec<usize>>,
    created: HashMap<String, usize>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self { names: vec![ROOT_NAME.to_string()], children: vec![Vec::new()], created: HashMap::new() }
    }

    fn insert(&mut self, segments: &[String]) {
        let mut parent = 0usize;
        for depth in 0..segments.len() {
            let full = segments[..=depth].join("/");
            let idx = match self.created.get(&full) {
                Some(&idx) => idx,
                None => {
                    let idx = self.names.len();
                    self.names.push(segments[depth].clone());
                    self.children.push(Vec::new());
                    self.children[parent].push(idx);
                    self.created.insert(full, idx);
                    idx
                }
            };
            parent = idx;
        }
    }

    fn materialize(&self, idx: usize) -> PathNode {
        PathNode {
            name: self.names[idx].clone(),
            children: self.children[idx].iter().map(|&c| self.materialize(c)).collect(),
        }
    }

    fn finish(self) -> PathNode {
        self.materialize(0)
    }
}

/// Deduplicated directory tree for the given origins, rooted at a node named
/// `"root"`. Children keep the order in which their directories sort.
pub fn build_pathnames_tree<S: AsRef<str>>(origins: &[S]) -> PathNode {
    let mut builder = TreeBuilder::new();
    for segments in split_out_pathnames(origins) {
        builder.insert(&segments);
    }
    builder.finish()
}
