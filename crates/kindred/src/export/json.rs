//! JSON export for renderers that draw the tree themselves.

use log::debug;
use serde::Serialize;

use kindred_core::geometry::Bounds;

use super::{Error, Exporter};
use crate::layout::{FamilyLayout, LayoutNode, Placement};

/// Serializes every node with its coordinates, size and links.
#[derive(Debug)]
pub struct Json {
    pretty: bool,
}

impl Default for Json {
    fn default() -> Self {
        Self::new()
    }
}

impl Json {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Emit a single line instead of indented output.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

#[derive(Serialize)]
struct Document<'a> {
    bounds: Bounds,
    nodes: Vec<Node<'a>>,
}

#[derive(Serialize)]
struct Node<'a> {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lifespan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
    spouses: Vec<Spouse>,
    x: f32,
    y: f32,
    level: usize,
    width: f32,
    height: f32,
    parent: Option<usize>,
    children: &'a [usize],
    placement: Placement,
    biological: bool,
}

#[derive(Serialize)]
struct Spouse {
    id: String,
    name: String,
}

impl<'a> From<&'a LayoutNode> for Node<'a> {
    fn from(node: &'a LayoutNode) -> Self {
        let person = node.person();
        Self {
            id: person.id().to_string(),
            name: person.display_name(),
            lifespan: person.lifespan(),
            avatar_url: person.avatar_url(),
            spouses: node
                .spouses()
                .iter()
                .map(|spouse| Spouse {
                    id: spouse.id().to_string(),
                    name: spouse.display_name(),
                })
                .collect(),
            x: node.x(),
            y: node.y(),
            level: node.level(),
            width: node.width(),
            height: node.height(),
            parent: node.parent(),
            children: node.children(),
            placement: node.placement(),
            biological: node.is_biological(),
        }
    }
}

impl Exporter for Json {
    fn export(&self, layout: &FamilyLayout) -> Result<String, Error> {
        let document = Document {
            bounds: layout.bounds(),
            nodes: layout.nodes().iter().map(Node::from).collect(),
        };

        let output = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(|err| Error::Render(err.to_string()))?;

        debug!(bytes = output.len(); "JSON document rendered");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use kindred_core::family::{Person, TreeNode};

    use super::*;
    use crate::layout::TreeLayoutEngine;

    #[test]
    fn test_json_lists_nodes_with_links() {
        let root = TreeNode::new(Person::new("j-root", "Rose", "Hill").with_birth_date("1931-04-02"))
            .with_spouse(Person::new("j-spouse", "Tom", "Hill"))
            .with_child(
                TreeNode::new(
                    Person::new("j-kid", "Ivy", "Hill").with_avatar_url("https://example.org/ivy.png"),
                )
                .non_biological(),
            );
        let layout = TreeLayoutEngine::default().arrange(&[root], &[]);

        let output = Json::new().compact().export(&layout).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let nodes = value["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["id"], "j-root");
        assert_eq!(nodes[0]["name"], "Rose Hill");
        assert_eq!(nodes[0]["lifespan"], "b. 1931");
        assert_eq!(nodes[0]["spouses"][0]["name"], "Tom Hill");
        assert_eq!(nodes[0]["children"][0], 1);
        assert_eq!(nodes[0]["placement"], "tree");
        assert_eq!(nodes[1]["parent"], 0);
        assert_eq!(nodes[0]["biological"], true);
        assert_eq!(nodes[1]["biological"], false);
        assert!(nodes[1].get("lifespan").is_none());
        assert!(nodes[0].get("avatar_url").is_none());
        assert_eq!(nodes[1]["avatar_url"], "https://example.org/ivy.png");
        assert_eq!(value["bounds"]["min_x"], 50.0);
    }

    #[test]
    fn test_empty_layout_exports_empty_list() {
        let layout = TreeLayoutEngine::default().arrange(&[], &[]);
        let output = Json::new().export(&layout).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["nodes"].as_array().unwrap().is_empty());
    }
}
