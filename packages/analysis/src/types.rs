use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// How an exported declaration relates to the component patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No component pattern matched
    NotAComponent,

    /// A class, or a function/arrow taking a props bag
    DirectComponent,

    /// A variable initialized by the ref-forwarding wrapper call
    ForwardRefComponent,
}

/// Structural description of a resolved props type
///
/// A shape tree is always finite: resolution is depth-bounded and
/// cycle-safe, so traversal terminates no matter what type graph produced
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedShape {
    /// A type that does not decompose further (primitive, union,
    /// unresolvable generic, ...), carrying its textual rendering
    Leaf(String),

    /// An array of some element shape
    ArrayOf(Box<ResolvedShape>),

    /// An object with named properties, in declaration order
    ObjectOf(Vec<(String, ResolvedShape)>),

    /// The depth budget ran out here
    MaxDepth,

    /// The type was already being resolved further up the current path
    Circular,

    /// A facade query failed for this subtree
    Error(String),
}

impl ResolvedShape {
    /// Property shape by name, for object shapes
    pub fn property(&self, name: &str) -> Option<&ResolvedShape> {
        match self {
            ResolvedShape::ObjectOf(props) => props
                .iter()
                .find(|(prop, _)| prop == name)
                .map(|(_, shape)| shape),
            _ => None,
        }
    }
}

impl Serialize for ResolvedShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResolvedShape::Leaf(text) => serializer.serialize_str(text),
            ResolvedShape::ArrayOf(element) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(element.as_ref())?;
                seq.end()
            }
            ResolvedShape::ObjectOf(props) => {
                let mut map = serializer.serialize_map(Some(props.len()))?;
                for (name, shape) in props {
                    map.serialize_entry(name, shape)?;
                }
                map.end()
            }
            ResolvedShape::MaxDepth => serializer.serialize_str("<max depth>"),
            ResolvedShape::Circular => serializer.serialize_str("<circular>"),
            ResolvedShape::Error(message) => {
                serializer.serialize_str(&format!("<error: {}>", message))
            }
        }
    }
}

/// Per-file analysis result: resolved components plus a count of exported
/// declarations that were attempted but skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    #[serde(serialize_with = "serialize_components")]
    components: Vec<(String, ResolvedShape)>,
    pub skipped: usize,
}

impl FileReport {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            skipped: 0,
        }
    }

    /// Record a component's shape. Names are unique per unit; on a repeat
    /// the last processed declaration wins.
    pub fn insert(&mut self, name: String, shape: ResolvedShape) {
        if let Some(slot) = self.components.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = shape;
        } else {
            self.components.push((name, shape));
        }
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedShape> {
        self.components
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, shape)| shape)
    }

    /// Resolved components in processing order
    pub fn components(&self) -> &[(String, ResolvedShape)] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Default for FileReport {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_components<S: Serializer>(
    components: &[(String, ResolvedShape)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(components.len()))?;
    for (name, shape) in components {
        map.serialize_entry(name, shape)?;
    }
    map.end()
}

/// Reports for an analysis run, keyed by path in input order
#[derive(Debug, Clone, Default)]
pub struct ReportMap(pub Vec<(String, FileReport)>);

impl ReportMap {
    pub fn get(&self, path: &str) -> Option<&FileReport> {
        self.0
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, report)| report)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, FileReport)> {
        self.0.iter()
    }
}

impl Serialize for ReportMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, report) in &self.0 {
            map.serialize_entry(path, report)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_serializes_to_its_text() {
        let shape = ResolvedShape::Leaf("string".to_string());
        assert_eq!(serde_json::to_string(&shape).unwrap(), r#""string""#);
    }

    #[test]
    fn test_array_serializes_to_single_element() {
        let shape = ResolvedShape::ArrayOf(Box::new(ResolvedShape::Leaf("number".to_string())));
        assert_eq!(serde_json::to_string(&shape).unwrap(), r#"["number"]"#);
    }

    #[test]
    fn test_object_serializes_in_declaration_order() {
        let shape = ResolvedShape::ObjectOf(vec![
            ("zeta".to_string(), ResolvedShape::Leaf("string".to_string())),
            ("alpha".to_string(), ResolvedShape::Leaf("number".to_string())),
        ]);
        assert_eq!(
            serde_json::to_string(&shape).unwrap(),
            r#"{"zeta":"string","alpha":"number"}"#
        );
    }

    #[test]
    fn test_marker_shapes_serialize_to_distinguished_strings() {
        assert_eq!(
            serde_json::to_string(&ResolvedShape::MaxDepth).unwrap(),
            r#""<max depth>""#
        );
        assert_eq!(
            serde_json::to_string(&ResolvedShape::Circular).unwrap(),
            r#""<circular>""#
        );
        assert_eq!(
            serde_json::to_string(&ResolvedShape::Error("boom".to_string())).unwrap(),
            r#""<error: boom>""#
        );
    }

    #[test]
    fn test_card_shape_encoding() {
        let shape = ResolvedShape::ObjectOf(vec![
            ("title".to_string(), ResolvedShape::Leaf("string".to_string())),
            (
                "tags".to_string(),
                ResolvedShape::ArrayOf(Box::new(ResolvedShape::Leaf("string".to_string()))),
            ),
        ]);
        assert_eq!(
            serde_json::to_string(&shape).unwrap(),
            r#"{"title":"string","tags":["string"]}"#
        );
    }

    #[test]
    fn test_report_insert_last_wins() {
        let mut report = FileReport::new();
        report.insert("Card".to_string(), ResolvedShape::Leaf("old".to_string()));
        report.insert("Badge".to_string(), ResolvedShape::Leaf("b".to_string()));
        report.insert("Card".to_string(), ResolvedShape::Leaf("new".to_string()));

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.get("Card"),
            Some(&ResolvedShape::Leaf("new".to_string()))
        );
        // Position of the first insertion is kept
        assert_eq!(report.components()[0].0, "Card");
    }

    #[test]
    fn test_report_serialization() {
        let mut report = FileReport::new();
        report.insert("Card".to_string(), ResolvedShape::Leaf("string".to_string()));
        report.skipped = 3;

        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"components":{"Card":"string"},"skipped":3}"#
        );
    }

    #[test]
    fn test_report_map_preserves_input_order() {
        let map = ReportMap(vec![
            ("z.tsx".to_string(), FileReport::new()),
            ("a.tsx".to_string(), FileReport::new()),
        ]);

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.find("z.tsx").unwrap() < json.find("a.tsx").unwrap());
    }
}
