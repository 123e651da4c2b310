//! Example: Laying out a family built in code
//!
//! This example builds people and relationships directly, derives the family
//! forest and prints where every card lands, without going through JSON.

use kindred::{
    export::{Exporter, json::Json},
    family::{Person, Relationship, RelationshipKind},
    layout::TreeLayoutEngine,
    structure::FamilyGraph,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let people = vec![
        Person::new("ada", "Ada", "Lane")
            .with_birth_date("1931-02-11")
            .with_death_date("2009-10-02"),
        Person::new("otto", "Otto", "Lane"),
        Person::new("mira", "Mira", "Lane").with_birth_date("1960-07-30"),
        Person::new("jonas", "Jonas", "Lane").with_birth_date("1963-01-04"),
        Person::new("tess", "Tess", "Vale"),
    ];

    let relationships = vec![
        Relationship::new("ada", "otto", RelationshipKind::Spouse),
        Relationship::new("ada", "mira", RelationshipKind::Parent),
        // Jonas was adopted
        Relationship::new("otto", "jonas", RelationshipKind::Parent).non_biological(),
    ];

    let graph = FamilyGraph::new(&people, &relationships)?;
    let forest = graph.forest();

    let layout = TreeLayoutEngine::default().arrange(&forest, &people);

    println!("Laid out {} people:", layout.len());
    for node in layout.nodes() {
        println!(
            "  {:<12} level {} at ({:>6.1}, {:>6.1}) {:?}",
            node.person().display_name(),
            node.level(),
            node.x(),
            node.y(),
            node.placement(),
        );
    }

    let canvas = layout.canvas_size();
    println!("\nCanvas: {} x {}", canvas.width(), canvas.height());

    let json = Json::new().compact().export(&layout)?;
    println!("\n{json}");

    Ok(())
}
