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

use crate::identifier::{SourceId, TargetId};

/// One side of an assignment pair: either a real object or the synthetic
/// pool of unassigned units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node<I> {
    Real(I),
    Unassigned,
}

pub type SourceNode = Node<SourceId>;
pub type TargetNode = Node<TargetId>;

impl<I> Node<I> {
    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Node::Real(_))
    }

    #[inline]
    pub fn is_unassigned(&self) -> bool {
        matches!(self, Node::Unassigned)
    }

    #[inline]
    pub fn as_real(&self) -> Option<&I> {
        match self {
            Node::Real(id) => Some(id),
            Node::Unassigned => None,
        }
    }

    #[inline]
    pub fn into_real(self) -> Option<I> {
        match self {
            Node::Real(id) => Some(id),
            Node::Unassigned => None,
        }
    }

    #[inline]
    pub fn from_option(id: Option<I>) -> Self {
        match id {
            Some(id) => Node::Real(id),
            None => Node::Unassigned,
        }
    }
}

impl<I> From<I> for Node<I> {
    #[inline]
    fn from(id: I) -> Self {
        Node::Real(id)
    }
}

impl<I: std::fmt::Display> std::fmt::Display for Node<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Real(id) => write!(f, "{}", id),
            Node::Unassigned => write!(f, "None"),
        }
    }
}
