use crate::snapshot::ElementSnapshot;
use crate::style::extract::{extract_styles, FilteredStyleMap};
use crate::style::properties::PropertyTables;
use std::collections::{BTreeMap, BTreeSet};

/// Which bucket an element's selector falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Id,
    Class,
    Tag,
}

/// Derive the selector for an element: `#id`, else the concatenated class
/// list in attribute order, else the bare (lowercased) tag.
pub fn resolve_selector(snapshot: &ElementSnapshot) -> (String, SelectorKind) {
    if !snapshot.id.is_empty() {
        return (format!("#{}", snapshot.id), SelectorKind::Id);
    }
    let classes = snapshot.class_list();
    if !classes.is_empty() {
        let selector: String = classes.iter().map(|c| format!(".{}", c)).collect();
        return (selector, SelectorKind::Class);
    }
    (snapshot.tag_name(), SelectorKind::Tag)
}

#[derive(Debug, Clone)]
pub struct IdEntry {
    pub snapshot: ElementSnapshot,
    pub styles: FilteredStyleMap,
}

#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub snapshot: ElementSnapshot,
    pub styles: FilteredStyleMap,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct TagEntry {
    pub snapshot: ElementSnapshot,
    pub styles: FilteredStyleMap,
}

/// Elements bucketed by selector.
///
/// Ids keep the last element seen for an id. Classes keep the first element
/// seen for a selector and count the rest. Tags keep every element.
/// The maps are ordered so iteration is already lexicographic.
#[derive(Debug, Default)]
pub struct SelectorGroups {
    pub ids: BTreeMap<String, IdEntry>,
    pub classes: BTreeMap<String, ClassEntry>,
    pub tags: BTreeMap<String, Vec<TagEntry>>,
}

impl SelectorGroups {
    /// Extract and bucket every snapshot, in dump order.
    pub fn build(snapshots: &[ElementSnapshot], tables: &PropertyTables) -> Self {
        let mut groups = SelectorGroups::default();
        for snapshot in snapshots {
            groups.insert(snapshot, tables);
        }
        log::debug!(
            "grouped {} snapshots into {} ids, {} classes, {} tags",
            snapshots.len(),
            groups.ids.len(),
            groups.classes.len(),
            groups.tags.len()
        );
        groups
    }

    pub fn insert(&mut self, snapshot: &ElementSnapshot, tables: &PropertyTables) {
        let (selector, kind) = resolve_selector(snapshot);
        match kind {
            SelectorKind::Id => {
                let styles = extract_styles(snapshot, tables);
                if self.ids.contains_key(&selector) {
                    log::debug!("{} seen again, replacing earlier styles", selector);
                }
                self.ids.insert(
                    selector,
                    IdEntry {
                        snapshot: snapshot.clone(),
                        styles,
                    },
                );
            }
            SelectorKind::Class => {
                if let Some(entry) = self.classes.get_mut(&selector) {
                    entry.count += 1;
                    return;
                }
                let styles = extract_styles(snapshot, tables);
                self.classes.insert(
                    selector,
                    ClassEntry {
                        snapshot: snapshot.clone(),
                        styles,
                        count: 1,
                    },
                );
            }
            SelectorKind::Tag => {
                let styles = extract_styles(snapshot, tables);
                self.tags.entry(selector).or_default().push(TagEntry {
                    snapshot: snapshot.clone(),
                    styles,
                });
            }
        }
    }

    /// Number of elements that landed in the tag bucket.
    pub fn tag_element_count(&self) -> usize {
        self.tags.values().map(Vec::len).sum()
    }

    /// Id and class selectors containing at least one of the keywords.
    pub fn selectors_matching(&self, keywords: &[String]) -> BTreeSet<String> {
        self.ids
            .keys()
            .chain(self.classes.keys())
            .filter(|selector| keywords.iter().any(|kw| selector.contains(kw.as_str())))
            .cloned()
            .collect()
    }
}
