//! Harmonized attribute schema registry.
//!
//! The definition source is a header-less CSV with rows
//! `name,type[,value1|value2|...]`. The registry is built once and is
//! read-only afterwards; share it by reference.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use biosample_model::{AttributeSchema, AttributeType};
use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::error::{Result, StandardsError};
use crate::paths::attributes_path;

const READER_SOURCE: &str = "<reader>";

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Vec<AttributeSchema>,
    by_name: BTreeMap<String, usize>,
}

impl SchemaRegistry {
    /// Load `attributes.csv` from the standards root.
    pub fn load_default() -> Result<Self> {
        Self::from_csv_path(&attributes_path())
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| StandardsError::io(path, e))?;
        let registry = parse_definitions(file, path)?;
        debug!(
            path = %path.display(),
            schemas = registry.len(),
            "loaded attribute definitions"
        );
        Ok(registry)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        parse_definitions(reader, Path::new(READER_SOURCE))
    }

    /// Build a registry from already-constructed schemas.
    ///
    /// Later schemas replace earlier ones with the same name.
    pub fn from_schemas(schemas: impl IntoIterator<Item = AttributeSchema>) -> Self {
        let mut registry = Self::default();
        for schema in schemas {
            registry.insert(schema);
        }
        registry
    }

    fn insert(&mut self, schema: AttributeSchema) {
        if let Some(&index) = self.by_name.get(&schema.name) {
            warn!(
                attribute = %schema.name,
                "duplicate attribute definition, keeping the last one"
            );
            self.schemas[index] = schema;
        } else {
            self.by_name.insert(schema.name.clone(), self.schemas.len());
            self.schemas.push(schema);
        }
    }

    /// Schemas of one type, in definition order.
    pub fn schemas_of_type(&self, attribute_type: AttributeType) -> Vec<&AttributeSchema> {
        self.schemas
            .iter()
            .filter(|schema| schema.attribute_type == attribute_type)
            .collect()
    }

    /// Type declared for an attribute name, `None` when the name is unknown.
    pub fn type_for_name(&self, name: &str) -> Option<AttributeType> {
        self.schema(name).map(|schema| schema.attribute_type)
    }

    pub fn schema(&self, name: &str) -> Option<&AttributeSchema> {
        self.by_name.get(name).map(|&index| &self.schemas[index])
    }

    /// Types with at least one schema, in enum declaration order.
    pub fn types(&self) -> Vec<AttributeType> {
        AttributeType::ALL
            .into_iter()
            .filter(|t| self.schemas.iter().any(|s| s.attribute_type == *t))
            .collect()
    }

    pub fn schemas(&self) -> &[AttributeSchema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn parse_definitions<R: Read>(reader: R, path: &Path) -> Result<SchemaRegistry> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut registry = SchemaRegistry::default();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| StandardsError::csv(path, e.to_string()))?;
        let line = row.position().map_or(index as u64 + 1, |p| p.line());
        if row.iter().all(str::is_empty) {
            continue;
        }
        if row.len() < 2 {
            return Err(StandardsError::csv(
                path,
                format!("line {line}: expected `name,type[,values]`"),
            ));
        }
        let name = row.get(0).unwrap_or_default().trim_matches('\u{feff}');
        if name.is_empty() {
            return Err(StandardsError::csv(
                path,
                format!("line {line}: attribute name is empty"),
            ));
        }
        let token = row.get(1).unwrap_or_default();
        let attribute_type = token.parse::<AttributeType>().unwrap_or_else(|_| {
            warn!(
                attribute = name,
                token, "unrecognized attribute type, treating as OTHER"
            );
            AttributeType::Other
        });
        let allowed_values = row
            .iter()
            .skip(2)
            .flat_map(|field| field.split('|'))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect();
        registry.insert(AttributeSchema::new(name, attribute_type, allowed_values));
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(text: &str) -> SchemaRegistry {
        SchemaRegistry::from_reader(text.as_bytes()).expect("parse definitions")
    }

    #[test]
    fn parses_types_and_allowed_values() {
        let registry = registry(
            "host_taxid,INTEGER\n\
             env_biome,ontology_term,ENVO\n\
             host_disease,ONTOLOGY_TERM,DOID|MESH\n\
             host_sex,VALUE_SET,male|female| pooled male and female \n",
        );
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.type_for_name("env_biome"),
            Some(AttributeType::OntologyTerm)
        );
        let disease = registry.schema("host_disease").expect("host_disease");
        assert_eq!(disease.allowed_values, vec!["DOID", "MESH"]);
        let sex = registry.schema("host_sex").expect("host_sex");
        assert_eq!(sex.allowed_values[2], "pooled male and female");
        assert!(registry.schema("host_taxid").expect("taxid").allowed_values.is_empty());
    }

    #[test]
    fn unknown_type_token_becomes_other() {
        let registry = registry("depth,DECIMAL\n");
        assert_eq!(registry.type_for_name("depth"), Some(AttributeType::Other));
    }

    #[test]
    fn unknown_name_is_none() {
        let registry = registry("smoker,BOOLEAN\n");
        assert_eq!(registry.type_for_name("not_declared"), None);
    }

    #[test]
    fn duplicate_names_keep_last_definition() {
        let registry = registry("ploidy,TERM\nploidy,VALUE_SET,haploid|diploid\n");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.type_for_name("ploidy"), Some(AttributeType::ValueSet));
        assert!(registry.schemas_of_type(AttributeType::Term).is_empty());
    }

    #[test]
    fn types_follow_declaration_order() {
        let registry = registry("a,TIMESTAMP\nb,BOOLEAN\nc,INTEGER\nd,BOOLEAN\n");
        assert_eq!(
            registry.types(),
            vec![
                AttributeType::Integer,
                AttributeType::Boolean,
                AttributeType::Timestamp
            ]
        );
        let booleans: Vec<_> = registry
            .schemas_of_type(AttributeType::Boolean)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(booleans, vec!["b", "d"]);
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let registry = registry("# harmonized attributes\n\nsmoker,BOOLEAN\n\n");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_short_rows() {
        let err = SchemaRegistry::from_reader("smoker\n".as_bytes()).unwrap_err();
        assert!(matches!(err, StandardsError::Csv { .. }));
    }

    #[test]
    fn rejects_empty_names() {
        let err = SchemaRegistry::from_reader(",BOOLEAN\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("attribute name is empty"));
    }
}
