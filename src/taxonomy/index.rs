//! Flattened folder index with scope resolution.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use super::{FolderNode, FolderType};

/// Folder ids an asset's `folder_id` must belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderScope {
    /// No restriction: every asset is in scope.
    All,
    /// Only assets attached to one of these folders.
    Only(BTreeSet<i64>),
}

impl FolderScope {
    /// Whether an asset attached to `folder_id` is in scope.
    ///
    /// Unattached assets only pass an unrestricted scope.
    pub fn contains(&self, folder_id: Option<i64>) -> bool {
        match self {
            FolderScope::All => true,
            FolderScope::Only(ids) => folder_id.is_some_and(|id| ids.contains(&id)),
        }
    }

    /// Whether this scope lets every asset through.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, FolderScope::All)
    }
}

/// A folder as stored in the index, with children referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFolder {
    pub id: i64,
    pub name: String,
    pub folder_type: FolderType,
    pub parent_id: Option<i64>,
    pub children: Vec<i64>,
}

/// Id-keyed index over a folder forest.
///
/// Built once per tree snapshot and never patched; a changed tree gets a
/// fresh index.
#[derive(Debug, Clone, Default)]
pub struct FolderTreeIndex {
    folders: HashMap<i64, IndexedFolder>,
    /// Pre-order traversal, roots first.
    order: Vec<i64>,
}

impl FolderTreeIndex {
    /// Flatten a folder forest into an index. O(n) in node count.
    ///
    /// Ids are expected to be unique; a repeated id keeps its first
    /// occurrence and the duplicate subtree is skipped with a warning.
    pub fn build(roots: &[FolderNode]) -> Self {
        let mut index = Self::default();
        for root in roots {
            index.insert(root, root.parent_folder_id);
        }
        debug!(folders = index.folders.len(), roots = roots.len(), "Folder index built");
        index
    }

    fn insert(&mut self, node: &FolderNode, parent_id: Option<i64>) -> bool {
        if self.folders.contains_key(&node.id) {
            warn!(folder_id = node.id, name = %node.name, "Duplicate folder id, skipping subtree");
            return false;
        }

        self.folders.insert(
            node.id,
            IndexedFolder {
                id: node.id,
                name: node.name.clone(),
                folder_type: node.folder_type,
                parent_id,
                children: Vec::with_capacity(node.children.len()),
            },
        );
        self.order.push(node.id);

        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            if self.insert(child, Some(node.id)) {
                children.push(child.id);
            }
        }
        if let Some(entry) = self.folders.get_mut(&node.id) {
            entry.children = children;
        }
        true
    }

    /// Number of indexed folders.
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    /// Whether the index holds no folders.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Look up a folder by id.
    pub fn get(&self, id: i64) -> Option<&IndexedFolder> {
        self.folders.get(&id)
    }

    /// Resolve a folder's type; `None` means the id is not in the tree.
    pub fn resolve_type(&self, id: i64) -> Option<FolderType> {
        self.folders.get(&id).map(|f| f.folder_type)
    }

    /// Direct children of a folder, in display order.
    pub fn children(&self, id: i64) -> impl Iterator<Item = &IndexedFolder> + '_ {
        self.folders
            .get(&id)
            .into_iter()
            .flat_map(|f| f.children.iter())
            .filter_map(|child| self.folders.get(child))
    }

    /// Parent of a folder, if it has one inside this tree.
    pub fn parent(&self, id: i64) -> Option<&IndexedFolder> {
        self.folders
            .get(&id)
            .and_then(|f| f.parent_id)
            .and_then(|parent| self.folders.get(&parent))
    }

    /// Folder names from the root down to `id`; empty when `id` is unknown.
    pub fn path(&self, id: i64) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = self.folders.get(&id);
        while let Some(folder) = current {
            names.push(folder.name.as_str());
            if names.len() > self.folders.len() {
                break;
            }
            current = folder.parent_id.and_then(|p| self.folders.get(&p));
        }
        names.reverse();
        names
    }

    /// Every environment folder, in tree order.
    pub fn environments(&self) -> impl Iterator<Item = &IndexedFolder> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.folders.get(id))
            .filter(|f| f.folder_type == FolderType::Environment)
    }

    /// Leaf-level folder ids an asset must be attached to in order to
    /// appear under `id`.
    ///
    /// - feature: the folder itself
    /// - deployment date: itself plus its feature children
    /// - environment: each deployment-date child plus that child's features
    /// - project: unrestricted
    /// - unknown id: the empty set, so a dangling selection matches nothing
    pub fn collect_descendant_leaf_ids(&self, id: i64) -> FolderScope {
        let Some(folder) = self.folders.get(&id) else {
            return FolderScope::Only(BTreeSet::new());
        };

        match folder.folder_type {
            FolderType::Project => FolderScope::All,
            FolderType::Feature => FolderScope::Only(BTreeSet::from([id])),
            FolderType::DeploymentDate => {
                let mut ids = BTreeSet::from([id]);
                ids.extend(self.feature_children(id));
                FolderScope::Only(ids)
            }
            FolderType::Environment => {
                let mut ids = BTreeSet::new();
                for date in self
                    .children(id)
                    .filter(|c| c.folder_type == FolderType::DeploymentDate)
                {
                    ids.insert(date.id);
                    ids.extend(self.feature_children(date.id));
                }
                FolderScope::Only(ids)
            }
        }
    }

    fn feature_children(&self, id: i64) -> impl Iterator<Item = i64> + '_ {
        self.children(id)
            .filter(|c| c.folder_type == FolderType::Feature)
            .map(|c| c.id)
    }
}
