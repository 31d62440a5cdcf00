use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::namespace::{Bucket, Catalogues, Scope, NO_NAMESPACE};

/// Ordered key → values entries of one namespace
pub type Entries = IndexMap<String, Vec<String>>;

/// A key-value annotation as stored on a remote object
///
/// Each item is a `(key, value1, value2, ...)` tuple flattened into a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapAnnotation {
    /// Annotation namespace, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Ordered key/value tuples
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl MapAnnotation {
    /// Create an annotation under a namespace
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            values: Vec::new(),
        }
    }

    /// Append a `(key, values...)` tuple
    pub fn with_item<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut item = vec![key.to_string()];
        item.extend(values.into_iter().map(Into::into));
        self.values.push(item);
        self
    }

    /// Namespace, falling back to [`NO_NAMESPACE`]
    pub fn namespace_or_default(&self) -> &str {
        self.namespace.as_deref().unwrap_or(NO_NAMESPACE)
    }
}

/// Namespaced metadata of one bucket, in presentation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataBucket {
    namespaces: IndexMap<String, Entries>,
}

impl MetadataBucket {
    /// Create an empty bucket
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no namespace has been recorded
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Number of namespaces
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Entries recorded under a namespace
    pub fn get(&self, namespace: &str) -> Option<&Entries> {
        self.namespaces.get(namespace)
    }

    /// Entries of a namespace, created empty if absent
    pub fn entries_mut(&mut self, namespace: &str) -> &mut Entries {
        self.namespaces.entry(namespace.to_string()).or_default()
    }

    /// Replace a namespace's entries with an empty map, keeping its position
    pub fn reset_namespace(&mut self, namespace: &str) -> &mut Entries {
        let entries = self.entries_mut(namespace);
        entries.clear();
        entries
    }

    /// Record a value list for a key. A repeated key overwrites the earlier values.
    pub fn insert(&mut self, namespace: &str, key: &str, values: Vec<String>) {
        self.entries_mut(namespace).insert(key.to_string(), values);
    }

    /// Namespaces in order
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Iterate `(namespace, entries)` pairs in order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Entries> {
        self.namespaces.iter()
    }

    /// Reorder namespaces to follow `order`, dropping any not listed in it
    pub fn into_catalogue_order(mut self, order: &[&str]) -> Self {
        let namespaces = order
            .iter()
            .filter_map(|ns| self.namespaces.swap_remove_entry(*ns))
            .collect();
        Self { namespaces }
    }
}

impl FromIterator<(String, Entries)> for MetadataBucket {
    fn from_iter<T: IntoIterator<Item = (String, Entries)>>(iter: T) -> Self {
        Self {
            namespaces: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MetadataBucket {
    type Item = (&'a String, &'a Entries);
    type IntoIter = indexmap::map::Iter<'a, String, Entries>;

    fn into_iter(self) -> Self::IntoIter {
        self.namespaces.iter()
    }
}

/// Metadata of one object split into the four buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsaMetadata {
    /// Investigation sections, in catalogue order
    pub investigation: MetadataBucket,
    /// Study sections, in catalogue order
    pub study: MetadataBucket,
    /// Assay sections, in catalogue order
    pub assay: MetadataBucket,
    /// Everything else, in encounter order
    pub other: MetadataBucket,
}

impl IsaMetadata {
    /// Four empty buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a bucket by tag
    pub fn bucket(&self, bucket: Bucket) -> &MetadataBucket {
        match bucket {
            Bucket::Investigation => &self.investigation,
            Bucket::Study => &self.study,
            Bucket::Assay => &self.assay,
            Bucket::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut MetadataBucket {
        match bucket {
            Bucket::Investigation => &mut self.investigation,
            Bucket::Study => &mut self.study,
            Bucket::Assay => &mut self.assay,
            Bucket::Other => &mut self.other,
        }
    }

    /// True when all four buckets are empty
    pub fn is_empty(&self) -> bool {
        Bucket::ALL.iter().all(|b| self.bucket(*b).is_empty())
    }

    /// Iterate buckets in output order
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &MetadataBucket)> {
        Bucket::ALL.into_iter().map(move |b| (b, self.bucket(b)))
    }
}

/// Sort annotations into the four buckets.
///
/// The first element of every annotation item is the key, the rest are its
/// values; a key repeated within a namespace keeps the last values seen. The
/// catalogued buckets come back in catalogue order, the Other bucket in
/// encounter order.
pub fn classify_and_collect<'a, I>(annotations: I, catalogues: &Catalogues) -> IsaMetadata
where
    I: IntoIterator<Item = &'a MapAnnotation>,
{
    let mut metadata = IsaMetadata::new();

    for annotation in annotations {
        let namespace = annotation.namespace_or_default();
        let entries = metadata
            .bucket_mut(catalogues.classify(namespace))
            .entries_mut(namespace);

        for item in &annotation.values {
            if let Some((key, values)) = item.split_first() {
                entries.insert(key.clone(), values.to_vec());
            }
        }
    }

    for scope in Scope::ALL {
        let bucket = metadata.bucket_mut(scope.into());
        *bucket = std::mem::take(bucket).into_catalogue_order(catalogues.namespaces(scope));
    }

    metadata
}
