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

pub trait IdentifierMarkerName {
    const NAME: &'static str;
}

/// Opaque identity of a source or target object, tagged by a marker type so
/// that the two sides of the assignment can never be mixed up.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier<I, U>(I, core::marker::PhantomData<U>);

impl<I, U> Identifier<I, U> {
    #[inline]
    pub fn new(id: I) -> Self {
        Self(id, core::marker::PhantomData)
    }

    #[inline]
    pub fn value(&self) -> &I {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I, U> std::fmt::Display for Identifier<I, U>
where
    I: std::fmt::Display,
    U: IdentifierMarkerName,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

impl<U> From<&str> for Identifier<String, U> {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value.to_owned())
    }
}

impl<U> From<String> for Identifier<String, U> {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceMarker;

impl IdentifierMarkerName for SourceMarker {
    const NAME: &'static str = "Source";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetMarker;

impl IdentifierMarkerName for TargetMarker {
    const NAME: &'static str = "Target";
}

pub type SourceId = Identifier<String, SourceMarker>;
pub type TargetId = Identifier<String, TargetMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_marker_name() {
        let s = SourceId::from("web");
        let t = TargetId::from("host-1");
        assert_eq!(s.to_string(), "Source(web)");
        assert_eq!(t.to_string(), "Target(host-1)");
    }

    #[test]
    fn test_value_and_into_inner() {
        let s = SourceId::new("a".to_string());
        assert_eq!(s.value(), "a");
        assert_eq!(s.into_inner(), "a".to_string());
    }

    #[test]
    fn test_ordering_follows_inner_value() {
        let a = TargetId::from("0");
        let b = TargetId::from("1");
        assert!(a < b);
        assert_eq!(a, TargetId::from(String::from("0")));
    }
}
