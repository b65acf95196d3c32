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

pub mod edge;
pub mod err;
pub mod problem;
pub mod registry;
pub mod table;

pub mod prelude {
    pub use crate::edge::WeightedEdge;
    pub use crate::err::{
        DuplicateEdgeError, EmptyEdgeTableError, MissingEdgeError, NegativeCountError,
        NonFiniteWeightError, OrphanSourceError, ProblemError, ProblemLoaderError,
        ReservedSentinelError, UnknownSourceError, UnknownTargetError,
        UnrepresentableWeightError,
    };
    pub use crate::problem::{
        DuplicateEdgePolicy, Problem, builder::ProblemBuilder, loader::ProblemLoader,
    };
    pub use crate::registry::{SourceRegistry, TargetRegistry};
    pub use crate::table::{
        WeightedEdgeTable, indexed::IndexedEdgeTable, scan::ScanEdgeTable,
    };
}
