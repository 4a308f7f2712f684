//! SPARQL plumbing for Explore
//!
//! Builds the per-item query and models the SPARQL 1.1 JSON results format
//! returned by the triplestore.

mod client;

pub use client::*;

use serde::Deserialize;

/// `skos:prefLabel`, used as the display name of every resource.
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Row cap applied to every item query.
pub const ITEM_QUERY_LIMIT: usize = 1000;

/// Builds the query fetching every outgoing triple of `uri` together with the
/// preferred labels of its predicates and objects.
///
/// The URI is placed between angle brackets as given. An empty or malformed
/// URI simply yields no bindings from the triplestore.
pub fn build_item_query(uri: &str) -> String {
    format!(
        "PREFIX skos: <http://www.w3.org/2004/02/skos/core#>\n\
         SELECT ?predicate ?predicateLabel ?object ?objectLabel WHERE {{\n\
         \t<{uri}> ?predicate ?object .\n\
         \tOPTIONAL {{ ?predicate skos:prefLabel ?predicateLabel . }}\n\
         \tOPTIONAL {{ ?object skos:prefLabel ?objectLabel . }}\n\
         }}\n\
         ORDER BY ASC(?predicateLabel)\n\
         LIMIT {limit}",
        uri = uri,
        limit = ITEM_QUERY_LIMIT,
    )
}

/// Top level of a `application/sparql-results+json` document.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlResults {
    pub results: ResultSet,
}

/// The `results` member of a SPARQL JSON document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// One row of the item query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub predicate: Term,
    #[serde(default)]
    pub predicate_label: Option<Term>,
    pub object: Term,
    #[serde(default)]
    pub object_label: Option<Term>,
}

/// An RDF term as serialized by the SPARQL JSON results format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Term {
    #[serde(rename = "type")]
    pub kind: TermKind,
    pub value: String,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
}

/// Kind of an RDF term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    #[serde(alias = "typed-literal")]
    Literal,
    Uri,
    Bnode,
    /// Any kind this service does not know how to render.
    #[serde(other)]
    Unsupported,
}

impl Term {
    /// A plain literal.
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Literal,
            value: value.into(),
            lang: None,
        }
    }

    /// A literal carrying a language tag.
    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Literal,
            value: value.into(),
            lang: Some(lang.into()),
        }
    }

    /// A named node.
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Uri,
            value: value.into(),
            lang: None,
        }
    }

    /// A blank node.
    pub fn bnode(value: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Bnode,
            value: value.into(),
            lang: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_query_embeds_subject() {
        let query = build_item_query("https://example.org/song/1");
        assert!(query.contains("<https://example.org/song/1> ?predicate ?object"));
        assert!(query.contains("OPTIONAL { ?predicate skos:prefLabel ?predicateLabel . }"));
        assert!(query.contains("OPTIONAL { ?object skos:prefLabel ?objectLabel . }"));
        assert!(query.contains("ORDER BY ASC(?predicateLabel)"));
        assert!(query.ends_with("LIMIT 1000"));
    }

    #[test]
    fn test_item_query_forwards_empty_uri() {
        let query = build_item_query("");
        assert!(query.contains("<> ?predicate ?object"));
    }

    #[test]
    fn test_parse_results() {
        let json = r#"{
            "head": {"vars": ["predicate", "predicateLabel", "object", "objectLabel"]},
            "results": {"bindings": [
                {
                    "predicate": {"type": "uri", "value": "http://purl.org/ontology/mo/performer"},
                    "predicateLabel": {"type": "literal", "value": "performer", "xml:lang": "en"},
                    "object": {"type": "uri", "value": "https://example.org/queen"}
                },
                {
                    "predicate": {"type": "uri", "value": "http://example.org/p"},
                    "object": {"type": "typed-literal", "value": "3", "datatype": "xsd:int"}
                },
                {
                    "predicate": {"type": "uri", "value": "http://example.org/q"},
                    "object": {"type": "triple", "value": "<< ex:a ex:b ex:c >>"}
                }
            ]}
        }"#;

        let parsed: SparqlResults = serde_json::from_str(json).unwrap();
        let bindings = parsed.results.bindings;
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].object.kind, TermKind::Uri);
        assert_eq!(
            bindings[0].predicate_label.as_ref().unwrap().lang.as_deref(),
            Some("en")
        );
        assert!(bindings[0].object_label.is_none());
        assert_eq!(bindings[1].object.kind, TermKind::Literal);
        assert_eq!(bindings[2].object.kind, TermKind::Unsupported);
    }
}
