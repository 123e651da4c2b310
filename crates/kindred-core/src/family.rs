//! Family data model: people, relationships and the nested tree they form.
//!
//! [`Person`] and [`Relationship`] mirror the records stored by the family
//! data source. [`TreeNode`] is the transient nested structure derived from
//! them, which is what the layout engine consumes.

use serde::{Deserialize, Serialize};

use crate::identifier::PersonId;

/// A member of the family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    birth_place: Option<String>,
    #[serde(default)]
    death_date: Option<String>,
    #[serde(default = "default_true")]
    is_living: bool,
}

fn default_true() -> bool {
    true
}

impl Person {
    /// Creates a living person with the given id and names.
    ///
    /// # Examples
    ///
    /// ```
    /// use kindred_core::family::Person;
    ///
    /// let person = Person::new("p1", "Ada", "Lovelace");
    /// assert_eq!(person.display_name(), "Ada Lovelace");
    /// assert!(person.is_living());
    /// ```
    pub fn new(id: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            id: PersonId::new(id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            avatar_url: None,
            birth_date: None,
            birth_place: None,
            death_date: None,
            is_living: true,
        }
    }

    /// Sets the birth date (ISO-8601 date string).
    pub fn with_birth_date(mut self, date: &str) -> Self {
        self.birth_date = Some(date.to_string());
        self
    }

    /// Sets the death date and marks the person as deceased.
    pub fn with_death_date(mut self, date: &str) -> Self {
        self.death_date = Some(date.to_string());
        self.is_living = false;
        self
    }

    /// Sets the avatar URL.
    pub fn with_avatar_url(mut self, url: &str) -> Self {
        self.avatar_url = Some(url.to_string());
        self
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }

    pub fn birth_place(&self) -> Option<&str> {
        self.birth_place.as_deref()
    }

    pub fn death_date(&self) -> Option<&str> {
        self.death_date.as_deref()
    }

    pub fn is_living(&self) -> bool {
        self.is_living
    }

    /// Returns "First Last", or the id when both names are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.id.to_string()
        } else {
            name.to_string()
        }
    }

    /// Returns a short lifespan label built from the year of each date.
    ///
    /// # Examples
    ///
    /// ```
    /// use kindred_core::family::Person;
    ///
    /// let person = Person::new("p1", "Ada", "Lovelace")
    ///     .with_birth_date("1815-12-10")
    ///     .with_death_date("1852-11-27");
    /// assert_eq!(person.lifespan().as_deref(), Some("1815 – 1852"));
    ///
    /// let living = Person::new("p2", "Sam", "Doe").with_birth_date("1990-01-01");
    /// assert_eq!(living.lifespan().as_deref(), Some("b. 1990"));
    /// ```
    pub fn lifespan(&self) -> Option<String> {
        let born = self.birth_date.as_deref().and_then(year_of);
        let died = self.death_date.as_deref().and_then(year_of);
        match (born, died) {
            (Some(born), Some(died)) => Some(format!("{born} – {died}")),
            (Some(born), None) if self.is_living => Some(format!("b. {born}")),
            (Some(born), None) => Some(format!("{born} – ?")),
            (None, Some(died)) => Some(format!("d. {died}")),
            (None, None) => None,
        }
    }
}

/// Extracts a leading four-digit year from a date string.
fn year_of(date: &str) -> Option<&str> {
    let year = date.trim().get(..4)?;
    year.chars().all(|c| c.is_ascii_digit()).then_some(year)
}

/// Kind of link between two people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// `person_id` is a parent of `related_person_id`.
    Parent,
    /// `person_id` is a child of `related_person_id`.
    Child,
    Spouse,
    Unmarried,
    Partner,
    Divorced,
    Sibling,
    /// Any kind that does not shape the hierarchy (grandparent, cousin, ...).
    #[serde(other)]
    Other,
}

impl RelationshipKind {
    /// Returns true for the symmetric couple kinds.
    pub fn is_partnership(self) -> bool {
        matches!(
            self,
            Self::Spouse | Self::Unmarried | Self::Partner | Self::Divorced
        )
    }
}

/// A directed link between two people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    person_id: PersonId,
    related_person_id: PersonId,
    #[serde(rename = "relationship_type")]
    kind: RelationshipKind,
    #[serde(default = "default_true")]
    is_biological: bool,
}

impl Relationship {
    pub fn new(person_id: &str, related_person_id: &str, kind: RelationshipKind) -> Self {
        Self {
            person_id: PersonId::new(person_id),
            related_person_id: PersonId::new(related_person_id),
            kind,
            is_biological: true,
        }
    }

    /// Marks the relationship as non-biological (adoption, step-parent, ...).
    pub fn non_biological(mut self) -> Self {
        self.is_biological = false;
        self
    }

    pub fn person_id(&self) -> PersonId {
        self.person_id
    }

    pub fn related_person_id(&self) -> PersonId {
        self.related_person_id
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn is_biological(&self) -> bool {
        self.is_biological
    }
}

/// The serialized family: everybody plus every relationship between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyDocument {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// A person nested with their descendants and spouses.
///
/// Built by a tree builder from flat [`Person`]/[`Relationship`] records.
/// A well-formed forest contains every person at most once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    person: Person,
    children: Vec<TreeNode>,
    spouses: Vec<Person>,
    biological: bool,
}

impl TreeNode {
    /// Creates a node with no children or spouses.
    pub fn new(person: Person) -> Self {
        Self {
            person,
            children: Vec::new(),
            spouses: Vec::new(),
            biological: true,
        }
    }

    /// Marks the link from the parent node down to this one as adoptive or step.
    pub fn non_biological(mut self) -> Self {
        self.biological = false;
        self
    }

    /// Appends a child subtree (builder style).
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a spouse (builder style).
    pub fn with_spouse(mut self, spouse: Person) -> Self {
        self.spouses.push(spouse);
        self
    }

    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    pub fn add_spouse(&mut self, spouse: Person) {
        self.spouses.push(spouse);
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn spouses(&self) -> &[Person] {
        &self.spouses
    }

    /// False when this node hangs off its parent through adoption or a step link.
    pub fn is_biological(&self) -> bool {
        self.biological
    }

    /// Number of people in this subtree, spouses included.
    pub fn len(&self) -> usize {
        1 + self.spouses.len() + self.children.iter().map(TreeNode::len).sum::<usize>()
    }

    /// Always false; a node holds at least its own person.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_id() {
        let person = Person::new("anon-1", " ", "");
        assert_eq!(person.display_name(), "anon-1");

        let person = Person::new("p", "Mary", "");
        assert_eq!(person.display_name(), "Mary");
    }

    #[test]
    fn test_lifespan_variants() {
        assert_eq!(Person::new("a", "A", "B").lifespan(), None);
        assert_eq!(
            Person::new("a", "A", "B")
                .with_death_date("2001-02-03")
                .lifespan()
                .as_deref(),
            Some("d. 2001")
        );
        assert_eq!(
            Person::new("a", "A", "B")
                .with_birth_date("unknown")
                .lifespan(),
            None
        );
    }

    #[test]
    fn test_deserialize_person_defaults() {
        let person: Person = serde_json::from_str(r#"{"id": "p1", "first_name": "Ann"}"#).unwrap();
        assert_eq!(person.id(), "p1");
        assert_eq!(person.first_name(), "Ann");
        assert_eq!(person.last_name(), "");
        assert!(person.is_living());
        assert_eq!(person.avatar_url(), None);
    }

    #[test]
    fn test_deserialize_relationship_kinds() {
        let json = r#"[
            {"person_id": "a", "related_person_id": "b", "relationship_type": "parent"},
            {"person_id": "a", "related_person_id": "c", "relationship_type": "unmarried", "is_biological": false},
            {"person_id": "a", "related_person_id": "d", "relationship_type": "great_aunt"}
        ]"#;
        let relationships: Vec<Relationship> = serde_json::from_str(json).unwrap();

        assert_eq!(relationships[0].kind(), RelationshipKind::Parent);
        assert!(relationships[0].is_biological());
        assert_eq!(relationships[1].kind(), RelationshipKind::Unmarried);
        assert!(relationships[1].kind().is_partnership());
        assert!(!relationships[1].is_biological());
        assert_eq!(relationships[2].kind(), RelationshipKind::Other);
    }

    #[test]
    fn test_tree_node_len() {
        let tree = TreeNode::new(Person::new("r", "Root", ""))
            .with_spouse(Person::new("s", "Spouse", ""))
            .with_child(TreeNode::new(Person::new("c1", "One", "")))
            .with_child(
                TreeNode::new(Person::new("c2", "Two", ""))
                    .with_child(TreeNode::new(Person::new("g", "Grand", ""))),
            );

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.spouses()[0].id(), "s");
    }
}
