//! Record fragments produced by free-form rules.

use std::fmt;

pub(crate) type Apply<D> = Box<dyn FnOnce(&mut D)>;

/// A keyed partial record: each entry writes one decoded value into the
/// record under construction.
///
/// The key is the output field the setter writes. The engine uses it to
/// reject two fragments that write the same field.
pub struct Fragment<D> {
    entries: Vec<(String, Apply<D>)>,
}

impl<D> Fragment<D> {
    /// A fragment that writes nothing. Useful for validation-only rules.
    pub fn empty() -> Self {
        Fragment {
            entries: Vec::new(),
        }
    }

    pub fn single<F>(key: impl Into<String>, apply: F) -> Self
    where
        F: FnOnce(&mut D) + 'static,
    {
        Fragment::empty().with(key, apply)
    }

    pub fn with<F>(mut self, key: impl Into<String>, apply: F) -> Self
    where
        F: FnOnce(&mut D) + 'static,
    {
        self.entries.push((key.into(), Box::new(apply)));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(String, Apply<D>)> {
        self.entries
    }
}

impl<D> Default for Fragment<D> {
    fn default() -> Self {
        Fragment::empty()
    }
}

impl<D> fmt::Debug for Fragment<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[test]
    fn entries_apply_in_order() {
        let fragment = Fragment::single("x", |p: &mut Point| p.x = 1)
            .with("y", |p: &mut Point| p.y = 2)
            .with("x", |p: &mut Point| p.x = 3);
        assert_eq!(fragment.keys().collect::<Vec<_>>(), vec!["x", "y", "x"]);

        let mut point = Point::default();
        for (_, apply) in fragment.into_entries() {
            apply(&mut point);
        }
        assert_eq!(point, Point { x: 3, y: 2 });
    }

    #[test]
    fn empty_fragment() {
        let fragment: Fragment<Point> = Fragment::empty();
        assert!(fragment.is_empty());
        assert_eq!(format!("{:?}", fragment), "[]");
    }
}
