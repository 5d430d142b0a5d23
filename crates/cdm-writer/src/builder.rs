//! Model builder operations on [`ManifestWriter`]

use tracing::debug;

use cdm_core::{
    AttributeId, AttributeItem, DataFormat, DocumentId, EntityId, ManifestId, TraitReference,
    CDM_DOCUMENT_SUFFIX,
};

use crate::error::WriterResult;
use crate::writer::ManifestWriter;

impl ManifestWriter {
    /// Create a manifest at `path` (default: the configured manifest file name)
    /// importing the foundational schema. The manifest is not added to any folder.
    pub fn new_manifest(&mut self, path: Option<&str>) -> WriterResult<ManifestId> {
        let name = path.unwrap_or(&self.config.manifest_file_name).to_string();
        let foundations = self.config.foundations_import();

        let corpus = self.corpus_mut()?;
        let manifest = corpus.make_manifest(&name);
        corpus.manifest_mut(manifest)?.push_import(foundations);

        Ok(manifest)
    }

    /// Create the entity document `<name>.cdm.json`, import the configured base
    /// schemas into it and add it to the remote root folder.
    pub fn add_entity_doc(&mut self, name: &str) -> WriterResult<DocumentId> {
        let imports = self.config.entity_doc_imports.clone();
        let namespace = self.config.remote_namespace.clone();

        let corpus = self.corpus_mut()?;
        let document = corpus.make_document(&format!("{}{}", name, CDM_DOCUMENT_SUFFIX), true);

        let definition = corpus.document_mut(document)?;
        for import in imports {
            if !definition.imports_path(&import) {
                definition.push_import(import);
            }
        }

        corpus.storage.fetch_root_folder_mut(&namespace)?.push(document);
        Ok(document)
    }

    /// Define entity `name` in `document` and declare it in `manifest` as
    /// `<name>.cdm.json/<name>`
    pub fn add_entity(
        &mut self,
        name: &str,
        document: DocumentId,
        manifest: ManifestId,
    ) -> WriterResult<EntityId> {
        let corpus = self.corpus_mut()?;
        corpus.manifest(manifest)?;

        let entity = corpus.define_entity(document, name)?;
        corpus.manifest_mut(manifest)?.push_entity(
            entity,
            name,
            format!("{0}{1}/{0}", name, CDM_DOCUMENT_SUFFIX),
        );

        Ok(entity)
    }

    /// Create a text attribute. It is not attached to any entity.
    pub fn new_attribute(&mut self, name: &str) -> WriterResult<AttributeId> {
        let corpus = self.corpus_mut()?;
        let attribute = corpus.make_type_attribute(name);
        corpus.attribute_mut(attribute)?.data_format = DataFormat::String;

        Ok(attribute)
    }

    /// Append `attribute` to `entity`'s attribute list
    pub fn add_attribute(
        &mut self,
        attribute: AttributeId,
        entity: EntityId,
    ) -> WriterResult<AttributeItem> {
        let corpus = self.corpus_mut()?;
        corpus.attribute(attribute)?;

        let position = corpus.entity_mut(entity)?.push_attribute(attribute);
        Ok(AttributeItem { attribute, position })
    }

    /// Make `entity` exhibit trait `name` (once per name) and apply it to
    /// `attribute` (every call)
    pub fn add_trait(&mut self, name: &str, entity: EntityId, attribute: AttributeId) -> WriterResult<()> {
        let corpus = self.corpus_mut()?;
        corpus.attribute(attribute)?;

        let definition = corpus.entity_mut(entity)?;
        if definition.exhibited_trait(name).is_none() {
            definition.push_exhibited_trait(TraitReference::simple(name));
        } else {
            debug!(trait_name = name, entity = %entity, "Entity already exhibits trait");
        }

        corpus
            .attribute_mut(attribute)?
            .apply_trait(TraitReference::simple(name));
        Ok(())
    }
}
