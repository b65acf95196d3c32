// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    edge::WeightedEdge,
    err::{
        NegativeCountError, NonFiniteWeightError, ProblemLoaderError, UnrepresentableWeightError,
    },
    problem::{DuplicateEdgePolicy, Problem},
    table::WeightedEdgeTable,
};
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{
    Deserialize, Deserializer,
    de::{self, Visitor},
};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use unit_alloc_core::prelude::{SourceId, TargetId};

/// Reads problems from YAML documents shaped like
///
/// ```yaml
/// sources: {a: 2, b: 1}
/// targets: {0: 3, 1: 1}
/// weights:
///   - [a, 0, 1]
///   - [a, 1, 0]
///   - [b, 0, 2]
/// ```
///
/// Identifiers may be strings or numbers; numbers are kept in their textual
/// form. Weights are read as `f64` and converted into the table's weight type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProblemLoader {
    duplicates: DuplicateEdgePolicy,
}

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn allow_duplicate_edges(mut self, yes: bool) -> Self {
        self.duplicates = if yes {
            DuplicateEdgePolicy::KeepFirst
        } else {
            DuplicateEdgePolicy::Reject
        };
        self
    }

    #[inline]
    pub fn from_str<T: WeightedEdgeTable>(
        &self,
        s: &str,
    ) -> Result<Problem<T>, ProblemLoaderError> {
        let doc: Document = serde_yaml::from_str(s)?;
        self.build(doc)
    }

    #[inline]
    pub fn from_reader<T: WeightedEdgeTable, R: Read>(
        &self,
        r: R,
    ) -> Result<Problem<T>, ProblemLoaderError> {
        let doc: Document = serde_yaml::from_reader(r)?;
        self.build(doc)
    }

    #[inline]
    pub fn from_path<T: WeightedEdgeTable>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Problem<T>, ProblemLoaderError> {
        let file = File::open(path).map_err(ProblemLoaderError::Io)?;
        self.from_reader(BufReader::new(file))
    }

    fn build<T: WeightedEdgeTable>(&self, doc: Document) -> Result<Problem<T>, ProblemLoaderError> {
        let sources: BTreeMap<SourceId, usize> = counts(doc.sources)?
            .into_iter()
            .map(|(k, n)| (SourceId::new(k), n))
            .collect();
        let targets: BTreeMap<TargetId, usize> = counts(doc.targets)?
            .into_iter()
            .map(|(k, n)| (TargetId::new(k), n))
            .collect();

        let mut table = T::default();
        for (from, to, weight) in doc.weights {
            let (from, to) = (SourceId::new(from.0), TargetId::new(to.0));
            if !weight.is_finite() {
                return Err(NonFiniteWeightError::new(from, to, weight).into());
            }
            // Integer weights truncate on conversion, so the value has to
            // survive the way back unchanged.
            let Some(w) = T::Weight::from_f64(weight)
                .filter(|w| ToPrimitive::to_f64(w) == Some(weight))
            else {
                return Err(UnrepresentableWeightError::new(from, to, weight).into());
            };
            table.add_edge(WeightedEdge::real(from, to, w));
        }

        tracing::debug!(
            "Loaded {} sources, {} targets and {} edges",
            sources.len(),
            targets.len(),
            table.len()
        );

        Ok(Problem::with_policy(sources, table, targets, self.duplicates)?)
    }
}

fn counts(raw: BTreeMap<ObjectKey, i64>) -> Result<BTreeMap<String, usize>, NegativeCountError> {
    raw.into_iter()
        .map(|(k, n)| match usize::try_from(n) {
            Ok(n) => Ok((k.0, n)),
            Err(_) => Err(NegativeCountError::new(k.0, n)),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct Document {
    sources: BTreeMap<ObjectKey, i64>,
    targets: BTreeMap<ObjectKey, i64>,
    weights: Vec<(ObjectKey, ObjectKey, f64)>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ObjectKey(String);

impl<'de> Deserialize<'de> for ObjectKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = ObjectKey;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a string or numeric identifier")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ObjectKey, E> {
                Ok(ObjectKey(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<ObjectKey, E> {
                Ok(ObjectKey(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ObjectKey, E> {
                Ok(ObjectKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ObjectKey, E> {
                Ok(ObjectKey(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ObjectKey, E> {
                Ok(ObjectKey(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ObjectKey, E> {
                Ok(ObjectKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{err::ProblemError, table::scan::ScanEdgeTable};
    use num_rational::BigRational;
    use ordered_float::OrderedFloat;
    use unit_alloc_core::prelude::{SourceNode, TargetNode};

    const SMALL_OK: &str = r#"
sources:
  a: 2
  b: 1
targets:
  0: 3
  1: 1
weights:
  - [a, 0, 1]
  - [a, 1, 0]
  - [b, 0, 2.5]
"#;

    #[inline]
    fn s(id: &str) -> SourceNode {
        SourceNode::Real(SourceId::from(id))
    }
    #[inline]
    fn t(id: &str) -> TargetNode {
        TargetNode::Real(TargetId::from(id))
    }

    #[test]
    fn test_loads_small_document_with_numeric_ids() {
        let p: Problem<ScanEdgeTable<OrderedFloat<f64>>> =
            ProblemLoader::new().from_str(SMALL_OK).unwrap();
        assert_eq!(p.sources().get(&SourceId::from("a")), Some(&2));
        assert_eq!(p.targets().get(&TargetId::from("0")), Some(&3));
        assert_eq!(p.targets().get(&TargetId::from("1")), Some(&1));
        assert_eq!(
            p.table().weight_of(&s("b"), &t("0")),
            Some(&OrderedFloat(2.5))
        );
    }

    #[test]
    fn test_loads_into_exact_weights() {
        let p: Problem<ScanEdgeTable<BigRational>> =
            ProblemLoader::new().from_str(SMALL_OK).unwrap();
        let w = p.table().weight_of(&s("b"), &t("0")).unwrap();
        assert_eq!(w, &BigRational::from_f64(2.5).unwrap());
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let doc = "sources: {a: -1}\ntargets: {x: 1}\nweights: [[a, x, 0]]\n";
        let err = ProblemLoader::new()
            .from_str::<ScanEdgeTable<i64>>(doc)
            .unwrap_err();
        match err {
            ProblemLoaderError::NegativeCount(e) => {
                assert_eq!(e.object(), "a");
                assert_eq!(e.count(), -1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_weight_is_rejected() {
        let doc = "sources: {a: 1}\ntargets: {x: 1}\nweights: [[a, x, .nan]]\n";
        let err = ProblemLoader::new()
            .from_str::<ScanEdgeTable<OrderedFloat<f64>>>(doc)
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::NonFiniteWeight(_)));
    }

    #[test]
    fn test_fractional_weight_into_integers_is_rejected() {
        let doc = "sources: {a: 1}\ntargets: {x: 1}\nweights: [[a, x, 2.9]]\n";
        let err = ProblemLoader::new()
            .from_str::<ScanEdgeTable<i64>>(doc)
            .unwrap_err();
        match err {
            ProblemLoaderError::UnrepresentableWeight(e) => assert_eq!(e.weight(), 2.9),
            other => panic!("unexpected error: {other}"),
        }

        let doc = "sources: {a: 1}\ntargets: {x: 1}\nweights: [[a, x, 3.0]]\n";
        let p = ProblemLoader::new()
            .from_str::<ScanEdgeTable<i64>>(doc)
            .unwrap();
        assert_eq!(p.table().weight_of(&s("a"), &t("x")), Some(&3));
    }

    #[test]
    fn test_malformed_yaml_is_reported() {
        let err = ProblemLoader::new()
            .from_str::<ScanEdgeTable<i64>>("sources: [")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::Yaml(_)));
    }

    #[test]
    fn test_duplicate_edges_follow_loader_flag() {
        let doc = "sources: {a: 1}\ntargets: {x: 1}\nweights: [[a, x, 1], [a, x, 2]]\n";
        let err = ProblemLoader::new()
            .from_str::<ScanEdgeTable<i64>>(doc)
            .unwrap_err();
        assert!(matches!(
            err,
            ProblemLoaderError::Problem(ProblemError::DuplicateEdge(_))
        ));

        let p = ProblemLoader::new()
            .allow_duplicate_edges(true)
            .from_str::<ScanEdgeTable<i64>>(doc)
            .unwrap();
        assert_eq!(p.table().weight_of(&s("a"), &t("x")), Some(&1));
    }

    #[test]
    fn test_empty_weights_are_rejected() {
        let doc = "sources: {a: 1}\ntargets: {x: 1}\nweights: []\n";
        let err = ProblemLoader::new()
            .from_str::<ScanEdgeTable<i64>>(doc)
            .unwrap_err();
        assert!(matches!(
            err,
            ProblemLoaderError::Problem(ProblemError::EmptyEdgeTable(_))
        ));
    }

    #[test]
    fn test_load_all_instances_from_workspace_root_instances_folder() {
        use std::fs;
        use std::path::PathBuf;

        fn find_instances_dir() -> Option<PathBuf> {
            let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
            while let Some(p) = cur {
                let cand = p.join("instances");
                if cand.is_dir() {
                    return Some(cand);
                }
                cur = p.parent();
            }
            None
        }

        let inst_dir = find_instances_dir().expect(
            "Could not find an `instances/` directory in any ancestor of CARGO_MANIFEST_DIR",
        );

        let mut files: Vec<PathBuf> = fs::read_dir(&inst_dir)
            .expect("read_dir(instances) failed")
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|x| x == "yml").unwrap_or(false))
            .collect();
        files.sort();
        assert!(!files.is_empty(), "No .yml instances in {}", inst_dir.display());

        let loader = ProblemLoader::default();
        for path in files {
            let problem: Problem<ScanEdgeTable<OrderedFloat<f64>>> = loader
                .from_path(&path)
                .unwrap_or_else(|e| panic!("Failed to load {}: {e}", path.display()));
            assert!(!problem.table().is_empty(), "No edges in {}", path.display());
        }
    }
}
