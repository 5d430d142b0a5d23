use crate::types::{DocumentId, ManifestId};

/// An entry in a folder's document collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderItem {
    /// A document owned by the corpus
    Document(DocumentId),
    /// A manifest owned by the corpus
    Manifest(ManifestId),
    /// A document known only by its path
    Path(String),
}

impl From<DocumentId> for FolderItem {
    fn from(id: DocumentId) -> Self {
        FolderItem::Document(id)
    }
}

impl From<ManifestId> for FolderItem {
    fn from(id: ManifestId) -> Self {
        FolderItem::Manifest(id)
    }
}

impl From<String> for FolderItem {
    fn from(path: String) -> Self {
        FolderItem::Path(path)
    }
}

impl From<&str> for FolderItem {
    fn from(path: &str) -> Self {
        FolderItem::Path(path.to_string())
    }
}

/// A folder in a mounted namespace
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FolderDefinition {
    /// Folder name; empty for a namespace root
    pub name: String,

    /// Namespace the folder belongs to
    pub namespace: String,

    /// Document collection, in insertion order. Duplicates are allowed.
    pub documents: Vec<FolderItem>,

    /// Sub-folders
    pub child_folders: Vec<FolderDefinition>,
}

impl FolderDefinition {
    /// The root folder of `namespace`
    pub fn root(namespace: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            namespace: namespace.into(),
            documents: Vec::new(),
            child_folders: Vec::new(),
        }
    }

    /// Append an item to the document collection
    pub fn push(&mut self, item: impl Into<FolderItem>) {
        self.documents.push(item.into());
    }

    /// Whether the collection holds `document` as an object entry
    pub fn contains_document(&self, document: DocumentId) -> bool {
        self.documents.contains(&FolderItem::Document(document))
    }

    /// Whether the collection holds `manifest` as an object entry
    pub fn contains_manifest(&self, manifest: ManifestId) -> bool {
        self.documents.contains(&FolderItem::Manifest(manifest))
    }

    /// Folder path holding `document` as an object entry, searching child
    /// folders depth first: `/` for this folder, `/raw/` for child `raw`
    pub fn document_folder_path(&self, document: DocumentId) -> Option<String> {
        if self.contains_document(document) {
            return Some("/".to_string());
        }
        self.child_folders.iter().find_map(|child| {
            child
                .document_folder_path(document)
                .map(|path| format!("/{}{}", child.name, path))
        })
    }

    /// Find a child folder, creating it if absent
    pub fn child_folder_mut(&mut self, name: &str) -> &mut FolderDefinition {
        let index = match self.child_folders.iter().position(|f| f.name == name) {
            Some(index) => index,
            None => {
                self.child_folders.push(FolderDefinition {
                    name: name.to_string(),
                    namespace: self.namespace.clone(),
                    documents: Vec::new(),
                    child_folders: Vec::new(),
                });
                self.child_folders.len() - 1
            }
        };
        &mut self.child_folders[index]
    }
}
