//! Family graph construction.
//!
//! [`FamilyGraph`] turns flat [`Person`] and [`Relationship`] records into the
//! nested [`TreeNode`] forest consumed by the layout engine. Parent/child
//! links are kept in a directed `petgraph` graph; couples and siblings are
//! kept as adjacency lists in insertion order.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use kindred_core::{
    family::{Person, Relationship, RelationshipKind, TreeNode},
    identifier::PersonId,
};

use crate::KindredError;

/// Edge weight of a parent → child link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parentage {
    /// False for adoptive and step relationships.
    pub biological: bool,
}

/// People plus the links between them, indexed for tree building.
#[derive(Debug)]
pub struct FamilyGraph<'a> {
    graph: DiGraph<&'a Person, Parentage>,
    indices: IndexMap<PersonId, NodeIndex>,
    partners: Vec<Vec<NodeIndex>>,
    siblings: Vec<Vec<NodeIndex>>,
}

impl<'a> FamilyGraph<'a> {
    /// Indexes `people` and folds `relationships` into graph edges.
    ///
    /// Relationships pointing at unknown people, or at the same person on
    /// both ends, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Graph`] when two people share an id.
    pub fn new(people: &'a [Person], relationships: &[Relationship]) -> Result<Self, KindredError> {
        let mut graph = DiGraph::with_capacity(people.len(), relationships.len());
        let mut indices = IndexMap::with_capacity(people.len());

        for person in people {
            let index = graph.add_node(person);
            if indices.insert(person.id(), index).is_some() {
                return Err(KindredError::Graph(format!(
                    "duplicate person id `{}`",
                    person.id()
                )));
            }
        }

        let mut family = Self {
            graph,
            indices,
            partners: vec![Vec::new(); people.len()],
            siblings: vec![Vec::new(); people.len()],
        };

        for relationship in relationships {
            family.add_relationship(relationship);
        }
        family.infer_parents_from_siblings();

        debug!(
            people = family.graph.node_count(),
            parent_links = family.graph.edge_count();
            "Family graph built"
        );
        Ok(family)
    }

    fn add_relationship(&mut self, relationship: &Relationship) {
        let (Some(&from), Some(&to)) = (
            self.indices.get(&relationship.person_id()),
            self.indices.get(&relationship.related_person_id()),
        ) else {
            warn!(
                from = relationship.person_id().to_string(),
                to = relationship.related_person_id().to_string();
                "Relationship references an unknown person, skipping"
            );
            return;
        };

        if from == to {
            warn!(person = relationship.person_id().to_string(); "Self relationship, skipping");
            return;
        }

        let parentage = Parentage {
            biological: relationship.is_biological(),
        };
        match relationship.kind() {
            RelationshipKind::Parent => self.add_parent_link(from, to, parentage),
            RelationshipKind::Child => self.add_parent_link(to, from, parentage),
            kind if kind.is_partnership() => link_both(&mut self.partners, from, to),
            RelationshipKind::Sibling => link_both(&mut self.siblings, from, to),
            _ => {}
        }
    }

    fn add_parent_link(&mut self, parent: NodeIndex, child: NodeIndex, parentage: Parentage) {
        if self.graph.find_edge(parent, child).is_none() {
            self.graph.add_edge(parent, child, parentage);
        }
    }

    /// Gives a parentless person the parents of a sibling who has some.
    fn infer_parents_from_siblings(&mut self) {
        for index in self.graph.node_indices().collect::<Vec<_>>() {
            if self.has_parents(index) {
                continue;
            }
            let adopted = self.siblings[index.index()]
                .iter()
                .find_map(|&sibling| self.parents(sibling).first().copied());
            if let Some(parent) = adopted {
                debug!(
                    person = self.graph[index].id().to_string(),
                    parent = self.graph[parent].id().to_string();
                    "Inferred parent from sibling"
                );
                self.add_parent_link(parent, index, Parentage { biological: true });
            }
        }
    }

    fn has_parents(&self, index: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .next()
            .is_some()
    }

    /// Parents in the order their links were recorded.
    fn parents(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, Direction::Incoming)
            .map(|edge| (edge.id(), edge.source()))
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, parent)| parent).collect()
    }

    /// Children in the order their links were recorded.
    fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, child)| child).collect()
    }

    fn is_biological(&self, parent: NodeIndex, child: NodeIndex) -> bool {
        self.graph
            .find_edge(parent, child)
            .is_none_or(|edge| self.graph[edge].biological)
    }

    /// Looks up a person by id.
    pub fn person(&self, id: PersonId) -> Option<&'a Person> {
        self.indices.get(&id).map(|&index| self.graph[index])
    }

    /// Ids of the person's parents, in recorded order.
    pub fn parents_of(&self, id: PersonId) -> Vec<PersonId> {
        self.indices
            .get(&id)
            .map(|&index| self.ids(self.parents(index)))
            .unwrap_or_default()
    }

    /// Ids of the person's children, in recorded order.
    pub fn children_of(&self, id: PersonId) -> Vec<PersonId> {
        self.indices
            .get(&id)
            .map(|&index| self.ids(self.children(index)))
            .unwrap_or_default()
    }

    fn ids(&self, indices: Vec<NodeIndex>) -> Vec<PersonId> {
        indices
            .into_iter()
            .map(|index| self.graph[index].id())
            .collect()
    }

    /// Builds the nested forest.
    ///
    /// Roots are parentless people, in input order, who have a child or a
    /// partner and were not already drawn as somebody's spouse. A childless
    /// person married to someone with parents is never a root; they join
    /// their partner's card wherever that partner is placed. Every person
    /// appears at most once; people nobody reaches are left out for the
    /// layout's unconnected grid.
    pub fn forest(&self) -> Vec<TreeNode> {
        let mut attached = HashSet::new();
        let mut roots = Vec::new();

        for index in self.graph.node_indices() {
            if attached.contains(&index) || self.has_parents(index) {
                continue;
            }
            let has_children = self.graph.neighbors(index).next().is_some();
            let partners = &self.partners[index.index()];
            if !has_children
                && (partners.is_empty() || partners.iter().any(|&p| self.has_parents(p)))
            {
                continue;
            }

            attached.insert(index);
            roots.push(self.build(index, true, &mut attached));
        }

        debug!(roots = roots.len(), attached = attached.len(); "Family forest built");
        roots
    }

    /// Depth-first subtree construction. `index` must already be in `attached`.
    ///
    /// `biological` describes the link from the node's parent down to it.
    fn build(
        &self,
        index: NodeIndex,
        biological: bool,
        attached: &mut HashSet<NodeIndex>,
    ) -> TreeNode {
        let mut node = TreeNode::new(self.graph[index].clone());
        if !biological {
            node = node.non_biological();
        }

        let mut household = vec![index];
        for &partner in &self.partners[index.index()] {
            if !self.has_parents(partner) && attached.insert(partner) {
                node.add_spouse(self.graph[partner].clone());
                household.push(partner);
            }
        }

        // Claim every child before descending so a child shared by both
        // partners is not picked up again deeper in the tree.
        let mut children = Vec::new();
        for member in household {
            for child in self.children(member) {
                if attached.insert(child) {
                    children.push((child, self.is_biological(member, child)));
                }
            }
        }

        for (child, biological) in children {
            node.add_child(self.build(child, biological, attached));
        }
        node
    }
}

fn link_both(lists: &mut [Vec<NodeIndex>], a: NodeIndex, b: NodeIndex) {
    if !lists[a.index()].contains(&b) {
        lists[a.index()].push(b);
    }
    if !lists[b.index()].contains(&a) {
        lists[b.index()].push(a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str) -> Person {
        Person::new(id, id, "Tree")
    }

    fn people(ids: &[&str]) -> Vec<Person> {
        ids.iter().map(|id| person(id)).collect()
    }

    fn ids(nodes: &[TreeNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| node.person().id().to_string())
            .collect()
    }

    #[test]
    fn test_couple_with_children() {
        let people = people(&["mum", "dad", "kid1", "kid2", "loner"]);
        let relationships = vec![
            Relationship::new("mum", "dad", RelationshipKind::Spouse),
            Relationship::new("mum", "kid1", RelationshipKind::Parent),
            Relationship::new("dad", "kid1", RelationshipKind::Parent),
            Relationship::new("kid2", "dad", RelationshipKind::Child),
        ];

        let forest = FamilyGraph::new(&people, &relationships).unwrap().forest();

        assert_eq!(ids(&forest), vec!["mum"]);
        let root = &forest[0];
        assert_eq!(root.spouses().len(), 1);
        assert_eq!(root.spouses()[0].id(), "dad");
        assert_eq!(ids(root.children()), vec!["kid1", "kid2"]);
        assert_eq!(root.len(), 4);
    }

    #[test]
    fn test_married_in_spouse_stays_with_own_parents() {
        let people = people(&["g1", "g2", "son", "in-law", "in-law-parent"]);
        let relationships = vec![
            Relationship::new("g1", "son", RelationshipKind::Parent),
            Relationship::new("in-law-parent", "in-law", RelationshipKind::Parent),
            Relationship::new("son", "in-law", RelationshipKind::Spouse),
        ];

        let forest = FamilyGraph::new(&people, &relationships).unwrap().forest();

        assert_eq!(ids(&forest), vec!["g1", "in-law-parent"]);
        let son = &forest[0].children()[0];
        assert!(son.spouses().is_empty());
        assert_eq!(ids(forest[1].children()), vec!["in-law"]);
    }

    #[test]
    fn test_spouse_joins_partner_whatever_the_input_order() {
        let relationships = vec![
            Relationship::new("g1", "son", RelationshipKind::Parent),
            Relationship::new("son", "bride", RelationshipKind::Spouse),
        ];
        let shape = |forest: &[TreeNode]| -> Vec<(String, Vec<String>)> {
            let son = &forest[0].children()[0];
            vec![
                (forest[0].person().id().to_string(), Vec::new()),
                (
                    son.person().id().to_string(),
                    son.spouses().iter().map(|s| s.id().to_string()).collect(),
                ),
            ]
        };

        let mut expected = None;
        for order in [
            ["g1", "son", "bride"],
            ["bride", "g1", "son"],
            ["son", "bride", "g1"],
        ] {
            let people = people(&order);
            let forest = FamilyGraph::new(&people, &relationships).unwrap().forest();

            assert_eq!(ids(&forest), vec!["g1"], "order {order:?}");
            let got = shape(&forest);
            assert_eq!(got[1].1, vec!["bride"], "order {order:?}");
            match &expected {
                None => expected = Some(got),
                Some(first) => assert_eq!(&got, first, "order {order:?}"),
            }
        }
    }

    #[test]
    fn test_adoption_marks_child_link() {
        let people = people(&["mum", "born", "adopted"]);
        let relationships = vec![
            Relationship::new("mum", "born", RelationshipKind::Parent),
            Relationship::new("mum", "adopted", RelationshipKind::Parent).non_biological(),
        ];

        let forest = FamilyGraph::new(&people, &relationships).unwrap().forest();

        let children = forest[0].children();
        assert!(forest[0].is_biological());
        assert!(children[0].is_biological());
        assert!(!children[1].is_biological());
    }

    #[test]
    fn test_people_without_links_are_not_roots() {
        let people = people(&["alone", "a", "b"]);
        let relationships = vec![Relationship::new("a", "b", RelationshipKind::Unmarried)];

        let forest = FamilyGraph::new(&people, &relationships).unwrap().forest();

        assert_eq!(ids(&forest), vec!["a"]);
        assert_eq!(forest[0].spouses()[0].id(), "b");
    }

    #[test]
    fn test_sibling_inherits_parent() {
        let people = people(&["parent", "known", "sib"]);
        let relationships = vec![
            Relationship::new("parent", "known", RelationshipKind::Parent),
            Relationship::new("sib", "known", RelationshipKind::Sibling),
        ];

        let graph = FamilyGraph::new(&people, &relationships).unwrap();
        assert_eq!(graph.parents_of(PersonId::new("sib")), vec![PersonId::new("parent")]);

        let forest = graph.forest();
        assert_eq!(ids(&forest), vec!["parent"]);
        assert_eq!(ids(forest[0].children()), vec!["known", "sib"]);
    }

    #[test]
    fn test_cycle_terminates_and_drops_unreachable() {
        let people = people(&["x", "y"]);
        let relationships = vec![
            Relationship::new("x", "y", RelationshipKind::Parent),
            Relationship::new("y", "x", RelationshipKind::Parent),
        ];

        let forest = FamilyGraph::new(&people, &relationships).unwrap().forest();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_unknown_and_self_links_skipped() {
        let people = people(&["p", "c"]);
        let relationships = vec![
            Relationship::new("p", "ghost", RelationshipKind::Parent),
            Relationship::new("p", "p", RelationshipKind::Spouse),
            Relationship::new("p", "c", RelationshipKind::Parent).non_biological(),
            Relationship::new("p", "c", RelationshipKind::Parent),
            Relationship::new("c", "p", RelationshipKind::Other),
        ];

        let graph = FamilyGraph::new(&people, &relationships).unwrap();
        assert_eq!(graph.children_of(PersonId::new("p")), vec![PersonId::new("c")]);
        assert!(graph.person(PersonId::new("ghost")).is_none());
        assert_eq!(ids(&graph.forest()), vec!["p"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let people = people(&["twin", "twin"]);
        let err = FamilyGraph::new(&people, &[]).unwrap_err();
        assert!(matches!(err, KindredError::Graph(ref msg) if msg.contains("twin")));
    }

    #[test]
    fn test_every_person_at_most_once() {
        let people = people(&["r1", "r2", "shared", "grand"]);
        let relationships = vec![
            Relationship::new("r1", "shared", RelationshipKind::Parent),
            Relationship::new("r2", "shared", RelationshipKind::Parent),
            Relationship::new("shared", "grand", RelationshipKind::Parent),
        ];

        let forest = FamilyGraph::new(&people, &relationships).unwrap().forest();

        assert_eq!(ids(&forest), vec!["r1", "r2"]);
        assert_eq!(forest[0].len(), 3);
        assert!(forest[1].children().is_empty());
    }
}
