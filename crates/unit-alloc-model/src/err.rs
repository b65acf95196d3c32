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

use unit_alloc_core::prelude::{SourceId, SourceNode, TargetId, TargetNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyEdgeTableError;

impl std::fmt::Display for EmptyEdgeTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The edge table is empty.")
    }
}

impl std::error::Error for EmptyEdgeTableError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReservedSentinelError {
    from: SourceNode,
    to: TargetNode,
}

impl ReservedSentinelError {
    pub fn new(from: SourceNode, to: TargetNode) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> &SourceNode {
        &self.from
    }

    pub fn to(&self) -> &TargetNode {
        &self.to
    }
}

impl std::fmt::Display for ReservedSentinelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Edge {} -> {} uses the reserved unassigned pool as an endpoint",
            self.from, self.to
        )
    }
}

impl std::error::Error for ReservedSentinelError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownSourceError(SourceId);

impl UnknownSourceError {
    pub fn new(id: SourceId) -> Self {
        Self(id)
    }

    pub fn id(&self) -> &SourceId {
        &self.0
    }
}

impl std::fmt::Display for UnknownSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} appears in an edge but has no multiplicity", self.0)
    }
}

impl std::error::Error for UnknownSourceError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownTargetError(TargetId);

impl UnknownTargetError {
    pub fn new(id: TargetId) -> Self {
        Self(id)
    }

    pub fn id(&self) -> &TargetId {
        &self.0
    }
}

impl std::fmt::Display for UnknownTargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} appears in an edge but has no capacity", self.0)
    }
}

impl std::error::Error for UnknownTargetError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrphanSourceError(SourceNode);

impl OrphanSourceError {
    pub fn new(source: SourceNode) -> Self {
        Self(source)
    }

    pub fn node(&self) -> &SourceNode {
        &self.0
    }
}

impl std::fmt::Display for OrphanSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} has no outgoing edge", self.0)
    }
}

impl std::error::Error for OrphanSourceError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateEdgeError {
    from: SourceNode,
    to: TargetNode,
}

impl DuplicateEdgeError {
    pub fn new(from: SourceNode, to: TargetNode) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> &SourceNode {
        &self.from
    }

    pub fn to(&self) -> &TargetNode {
        &self.to
    }
}

impl std::fmt::Display for DuplicateEdgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge {} -> {} is defined more than once", self.from, self.to)
    }
}

impl std::error::Error for DuplicateEdgeError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingEdgeError {
    from: SourceNode,
    to: TargetNode,
}

impl MissingEdgeError {
    pub fn new(from: SourceNode, to: TargetNode) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> &SourceNode {
        &self.from
    }

    pub fn to(&self) -> &TargetNode {
        &self.to
    }
}

impl std::fmt::Display for MissingEdgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No edge {} -> {} in the weight table", self.from, self.to)
    }
}

impl std::error::Error for MissingEdgeError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProblemError {
    EmptyEdgeTable(EmptyEdgeTableError),
    ReservedSentinel(ReservedSentinelError),
    UnknownSource(UnknownSourceError),
    UnknownTarget(UnknownTargetError),
    OrphanSource(OrphanSourceError),
    DuplicateEdge(DuplicateEdgeError),
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::EmptyEdgeTable(e) => write!(f, "{}", e),
            ProblemError::ReservedSentinel(e) => write!(f, "{}", e),
            ProblemError::UnknownSource(e) => write!(f, "{}", e),
            ProblemError::UnknownTarget(e) => write!(f, "{}", e),
            ProblemError::OrphanSource(e) => write!(f, "{}", e),
            ProblemError::DuplicateEdge(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<EmptyEdgeTableError> for ProblemError {
    fn from(err: EmptyEdgeTableError) -> Self {
        ProblemError::EmptyEdgeTable(err)
    }
}

impl From<ReservedSentinelError> for ProblemError {
    fn from(err: ReservedSentinelError) -> Self {
        ProblemError::ReservedSentinel(err)
    }
}

impl From<UnknownSourceError> for ProblemError {
    fn from(err: UnknownSourceError) -> Self {
        ProblemError::UnknownSource(err)
    }
}

impl From<UnknownTargetError> for ProblemError {
    fn from(err: UnknownTargetError) -> Self {
        ProblemError::UnknownTarget(err)
    }
}

impl From<OrphanSourceError> for ProblemError {
    fn from(err: OrphanSourceError) -> Self {
        ProblemError::OrphanSource(err)
    }
}

impl From<DuplicateEdgeError> for ProblemError {
    fn from(err: DuplicateEdgeError) -> Self {
        ProblemError::DuplicateEdge(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NegativeCountError {
    object: String,
    count: i64,
}

impl NegativeCountError {
    pub fn new(object: impl Into<String>, count: i64) -> Self {
        Self {
            object: object.into(),
            count,
        }
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

impl std::fmt::Display for NegativeCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} has negative count {}", self.object, self.count)
    }
}

impl std::error::Error for NegativeCountError {}

#[derive(Debug, Clone, PartialEq)]
pub struct NonFiniteWeightError {
    from: SourceId,
    to: TargetId,
    weight: f64,
}

impl NonFiniteWeightError {
    pub fn new(from: SourceId, to: TargetId, weight: f64) -> Self {
        Self { from, to, weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl std::fmt::Display for NonFiniteWeightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Edge {} -> {} has non-finite weight {}",
            self.from, self.to, self.weight
        )
    }
}

impl std::error::Error for NonFiniteWeightError {}

#[derive(Debug, Clone, PartialEq)]
pub struct UnrepresentableWeightError {
    from: SourceId,
    to: TargetId,
    weight: f64,
}

impl UnrepresentableWeightError {
    pub fn new(from: SourceId, to: TargetId, weight: f64) -> Self {
        Self { from, to, weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl std::fmt::Display for UnrepresentableWeightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Weight {} of edge {} -> {} cannot be represented by the chosen weight type",
            self.weight, self.from, self.to
        )
    }
}

impl std::error::Error for UnrepresentableWeightError {}

#[derive(Debug)]
pub enum ProblemLoaderError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    NegativeCount(NegativeCountError),
    NonFiniteWeight(NonFiniteWeightError),
    UnrepresentableWeight(UnrepresentableWeightError),
    Problem(ProblemError),
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ProblemLoaderError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<NegativeCountError> for ProblemLoaderError {
    fn from(e: NegativeCountError) -> Self {
        Self::NegativeCount(e)
    }
}

impl From<NonFiniteWeightError> for ProblemLoaderError {
    fn from(e: NonFiniteWeightError) -> Self {
        Self::NonFiniteWeight(e)
    }
}

impl From<UnrepresentableWeightError> for ProblemLoaderError {
    fn from(e: UnrepresentableWeightError) -> Self {
        Self::UnrepresentableWeight(e)
    }
}

impl From<ProblemError> for ProblemLoaderError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ProblemLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            Yaml(e) => write!(f, "YAML error: {e}"),
            NegativeCount(e) => write!(f, "count error: {e}"),
            NonFiniteWeight(e) => write!(f, "weight error: {e}"),
            UnrepresentableWeight(e) => write!(f, "weight error: {e}"),
            Problem(e) => write!(f, "problem error: {e}"),
        }
    }
}

impl std::error::Error for ProblemLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProblemLoaderError::Io(e) => Some(e),
            ProblemLoaderError::Yaml(e) => Some(e),
            _ => None,
        }
    }
}
