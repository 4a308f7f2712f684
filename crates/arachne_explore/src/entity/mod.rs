//! Entity views built from triplestore bindings
//!
//! [`aggregate`] folds the flat rows of the item query into an [`EntityView`]:
//! the preferred label, the (English) type labels, and every labelled
//! predicate with its values grouped and sorted for display.

mod collate;

pub use collate::{strip_non_word, LabelKey};

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::sparql::{Binding, TermKind, RDF_TYPE, SKOS_PREF_LABEL};

/// Language accepted for type labels, alongside untagged literals.
pub const DEFAULT_LANG: &str = "en";

/// Label shown when a value has no usable text.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Kind of object held by a predicate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Literal,
    Uri,
}

/// A single renderable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueView {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// All values of one predicate.
///
/// `object_kind` is taken from the first value seen. Later values are appended
/// whatever their kind, so data that mixes literals and URIs under one
/// predicate ends up in a single group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateGroup {
    pub label: String,
    pub object_kind: ObjectKind,
    pub values: Vec<ValueView>,
}

/// Everything needed to render one item page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityView {
    pub subject_uri: String,
    pub pref_label: Option<String>,
    pub types: Vec<String>,
    pub predicates: BTreeMap<String, PredicateGroup>,
}

impl EntityView {
    /// Looks up the group for a predicate URI.
    pub fn group(&self, predicate: &str) -> Option<&PredicateGroup> {
        self.predicates.get(predicate)
    }
}

/// Builds the view of `subject_uri` from its item-query bindings.
///
/// `pref_label` keeps the last value seen and `types` keeps duplicates.
///
/// # Errors
///
/// Returns [`Error::Rendering`] when a labelled predicate points at a term
/// kind other than a literal, URI or blank node.
pub fn aggregate(subject_uri: &str, bindings: &[Binding]) -> Result<EntityView> {
    let mut pref_label = None;
    let mut types = Vec::new();
    let mut predicates: BTreeMap<String, PredicateGroup> = BTreeMap::new();

    for binding in bindings {
        let predicate = binding.predicate.value.as_str();

        if predicate == SKOS_PREF_LABEL {
            pref_label = Some(binding.object.value.clone());
            continue;
        }

        if predicate == RDF_TYPE {
            if let Some(label) = &binding.object_label {
                if accepts_lang(label.lang.as_deref()) {
                    types.push(label.value.clone());
                }
                continue;
            }
        }

        let Some(predicate_label) = &binding.predicate_label else {
            continue;
        };
        let Some((kind, value)) = value_view(binding)? else {
            continue;
        };

        predicates
            .entry(predicate.to_string())
            .or_insert_with(|| PredicateGroup {
                label: predicate_label.value.clone(),
                object_kind: kind,
                values: Vec::new(),
            })
            .values
            .push(value);
    }

    for group in predicates.values_mut() {
        sort_values(&mut group.values);
    }

    Ok(EntityView {
        subject_uri: subject_uri.to_string(),
        pref_label,
        types,
        predicates,
    })
}

/// Sorts values by their normalized label, keeping encounter order for ties.
pub fn sort_values(values: &mut [ValueView]) {
    values.sort_by_cached_key(|value| LabelKey::new(&value.label));
}

fn accepts_lang(lang: Option<&str>) -> bool {
    match lang {
        None => true,
        Some(lang) => lang == DEFAULT_LANG,
    }
}

/// Blank nodes yield `None`: they cannot be shown without dereferencing.
fn value_view(binding: &Binding) -> Result<Option<(ObjectKind, ValueView)>> {
    let object = &binding.object;
    match object.kind {
        TermKind::Literal => Ok(Some((
            ObjectKind::Literal,
            ValueView {
                label: non_empty(&object.value).unwrap_or(UNKNOWN_LABEL).to_string(),
                uri: None,
            },
        ))),
        TermKind::Uri => {
            let label = binding
                .object_label
                .as_ref()
                .and_then(|label| non_empty(&label.value))
                .or_else(|| non_empty(&object.value))
                .unwrap_or(UNKNOWN_LABEL);
            Ok(Some((
                ObjectKind::Uri,
                ValueView {
                    label: label.to_string(),
                    uri: Some(object.value.clone()),
                },
            )))
        }
        TermKind::Bnode => Ok(None),
        TermKind::Unsupported => Err(Error::Rendering(format!(
            "unsupported object term {:?} for predicate <{}>",
            object.value, binding.predicate.value
        ))),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sparql::Term;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const NOTES: &str = "ex:notes";
    const LINKS: &str = "ex:links";
    const HIDDEN: &str = "ex:hidden";
    const SONG_TYPE: &str = "http://purl.org/ontology/mo/Track";

    // -- Strategy helpers --

    fn row(
        predicate: &str,
        predicate_label: Option<&str>,
        object: Term,
        object_label: Option<Term>,
    ) -> Binding {
        Binding {
            predicate: Term::uri(predicate),
            predicate_label: predicate_label.map(|label| Term::literal(label)),
            object,
            object_label,
        }
    }

    /// Blank node values carry a `_:` prefix no other generated text can have.
    fn arb_object(kinds: Vec<TermKind>) -> impl Strategy<Value = Term> {
        (prop::sample::select(kinds), "[a-zA-Zé ,!]{0,6}").prop_map(|(kind, value)| match kind {
            TermKind::Bnode => Term::bnode(format!("_:{}", value)),
            TermKind::Uri => Term::uri(value),
            _ => Term::literal(value),
        })
    }

    fn arb_label() -> impl Strategy<Value = Term> {
        "[a-zA-Zé ]{0,6}".prop_map(|value| Term::literal(value))
    }

    fn arb_row() -> impl Strategy<Value = Binding> {
        prop_oneof![
            (any::<bool>(), arb_object(vec![TermKind::Literal, TermKind::Bnode])).prop_map(
                |(labelled, object)| row(NOTES, labelled.then_some("notes"), object, None)
            ),
            (
                any::<bool>(),
                arb_object(vec![TermKind::Uri, TermKind::Bnode]),
                prop::option::of(arb_label()),
            )
                .prop_map(|(labelled, object, label)| {
                    row(LINKS, labelled.then_some("links"), object, label)
                }),
            arb_object(vec![TermKind::Literal, TermKind::Uri, TermKind::Bnode])
                .prop_map(|object| row(HIDDEN, None, object, None)),
            (
                prop::sample::select(vec![None, Some("en"), Some("fr")]),
                "[A-Za-z]{1,6}",
            )
                .prop_map(|(lang, label)| {
                    let label = match lang {
                        Some(lang) => Term::lang_literal(label, lang),
                        None => Term::literal(label),
                    };
                    row(RDF_TYPE, None, Term::uri(SONG_TYPE), Some(label))
                }),
            "[A-Za-z ]{0,8}"
                .prop_map(|label| row(SKOS_PREF_LABEL, None, Term::literal(label), None)),
        ]
    }

    fn arb_rows() -> impl Strategy<Value = Vec<Binding>> {
        prop::collection::vec(arb_row(), 0..24)
    }

    /// Drops what encounter order may legitimately change: the last-wins
    /// preferred label, the order of type labels and the order of tied values.
    fn canonical(mut view: EntityView) -> EntityView {
        view.pref_label = None;
        view.types.sort();
        for group in view.predicates.values_mut() {
            group.values.sort_by(|a, b| {
                (LabelKey::new(&a.label), &a.label, &a.uri)
                    .cmp(&(LabelKey::new(&b.label), &b.label, &b.uri))
            });
        }
        view
    }

    proptest! {
        #[test]
        fn shuffled_rows_give_same_view(
            (rows, shuffled) in arb_rows()
                .prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle()))
        ) {
            let forward = aggregate("ex:s", &rows).unwrap();
            let backward = aggregate("ex:s", &shuffled).unwrap();
            prop_assert_eq!(canonical(forward), canonical(backward));
        }

        #[test]
        fn blank_nodes_never_rendered(rows in arb_rows()) {
            let view = aggregate("ex:s", &rows).unwrap();
            for group in view.predicates.values() {
                for value in &group.values {
                    prop_assert!(!value.label.starts_with("_:"));
                    prop_assert!(!value.uri.as_deref().unwrap_or_default().starts_with("_:"));
                }
            }
        }

        #[test]
        fn groups_only_for_labelled_predicates(rows in arb_rows()) {
            let view = aggregate("ex:s", &rows).unwrap();
            let expected: BTreeSet<&str> = rows
                .iter()
                .filter(|r| r.predicate_label.is_some() && r.object.kind != TermKind::Bnode)
                .filter(|r| r.predicate.value != SKOS_PREF_LABEL)
                .filter(|r| !(r.predicate.value == RDF_TYPE && r.object_label.is_some()))
                .map(|r| r.predicate.value.as_str())
                .collect();
            let actual: BTreeSet<&str> = view.predicates.keys().map(String::as_str).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn sorting_twice_changes_nothing(labels in prop::collection::vec("\\PC{0,8}", 0..16)) {
            let mut values: Vec<ValueView> = labels
                .into_iter()
                .map(|label| ValueView { label, uri: None })
                .collect();
            sort_values(&mut values);
            let once = values.clone();
            sort_values(&mut values);
            prop_assert_eq!(&values, &once);
            prop_assert!(once
                .windows(2)
                .all(|pair| LabelKey::new(&pair[0].label) <= LabelKey::new(&pair[1].label)));
        }
    }
}
