//! Rosters and absentee sets.
//!
//! Both are parsed from newline-separated text as typed into a form:
//! entries are trimmed and blank lines dropped.

use std::collections::HashSet;

/// Ordered roster of names; a name's position is its draw index.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::types::Roster;
///
/// let roster = Roster::from_lines("Aoi\n  Ren \n\nMio", 5);
/// assert_eq!(roster.names(), &["Aoi", "Ren", "Mio", "Name4", "Name5"]);
///
/// let truncated = Roster::from_lines("Aoi\nRen\nMio", 2);
/// assert_eq!(truncated.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Creates a roster from names, keeping their order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses newline-separated names and fits the result to `class_size`.
    ///
    /// Missing entries are filled with [`Roster::placeholder`] names and
    /// surplus entries are dropped.
    pub fn from_lines(text: &str, class_size: usize) -> Self {
        let mut names: Vec<String> = parse_lines(text).collect();
        names.truncate(class_size);
        let start = names.len();
        names.extend((start..class_size).map(Self::placeholder));
        Self { names }
    }

    /// Placeholder name used for an unnamed position.
    pub fn placeholder(index: usize) -> String {
        format!("Name{}", index + 1)
    }

    /// Number of names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the roster has no names.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name at `index`, if any.
    #[inline]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// All names in draw-index order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterates `(index, name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }

    /// Lines of the form `"1 : name"`, as shown to the class.
    pub fn numbered(&self) -> Vec<String> {
        self.iter()
            .map(|(i, name)| format!("{} : {}", i + 1, name))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Names excluded from the next pick only.
///
/// # Examples
///
/// ```rust
/// use fairpick_core::types::AbsenteeSet;
///
/// let absent = AbsenteeSet::from_lines(" Ren \n\nMio\n");
/// assert!(absent.contains("Ren"));
/// assert!(!absent.contains("Aoi"));
/// assert_eq!(absent.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbsenteeSet {
    names: HashSet<String>,
}

impl AbsenteeSet {
    /// An empty set: nobody is absent.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parses newline-separated names.
    pub fn from_lines(text: &str) -> Self {
        parse_lines(text).collect()
    }

    /// Returns `true` if `name` is absent.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of absent names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nobody is absent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AbsenteeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn parse_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_pads_with_placeholders() {
        let roster = Roster::from_lines("", 3);
        assert_eq!(roster.names(), &["Name1", "Name2", "Name3"]);
    }

    #[test]
    fn test_from_lines_handles_crlf() {
        let roster = Roster::from_lines("Aoi\r\nRen\r\n", 2);
        assert_eq!(roster.names(), &["Aoi", "Ren"]);
    }

    #[test]
    fn test_numbered_is_one_based() {
        let roster = Roster::new(["Aoi", "Ren"]);
        assert_eq!(roster.numbered(), vec!["1 : Aoi", "2 : Ren"]);
    }

    #[test]
    fn test_name_lookup() {
        let roster: Roster = ["A", "B"].into_iter().collect();
        assert_eq!(roster.name(1), Some("B"));
        assert_eq!(roster.name(2), None);
    }

    #[test]
    fn test_absentees_collected_from_iter() {
        let absent: AbsenteeSet = vec!["A".to_string(), "A".to_string()].into_iter().collect();
        assert_eq!(absent.len(), 1);
        assert!(AbsenteeSet::none().is_empty());
    }
}
