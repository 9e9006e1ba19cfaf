//! Example: Declaring a custom schema and rendering it
//!
//! This example demonstrates how to build a schema programmatically with
//! the metadata types and render it to SVG, without using the built-in
//! social-network model.

use sociogram::{
    DiagramBuilder,
    schema::{Column, ColumnType, Entity, Enumeration, Relation, Schema},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building schema from metadata types...\n");

    let schema = Schema::new("library")
        .enumeration(Enumeration::new("loan_state", ["open", "returned", "lost"]))
        .entity(
            Entity::new("member")
                .column(Column::new("id", ColumnType::Integer).primary_key())
                .column(Column::new("name", ColumnType::text(120)))
                .relation(Relation::has_many("loans", "loan")),
        )
        .entity(
            Entity::new("book")
                .column(Column::new("id", ColumnType::Integer).primary_key())
                .column(Column::new("title", ColumnType::text(200)))
                .relation(Relation::has_many("loans", "loan")),
        )
        .entity(
            Entity::new("loan")
                .column(Column::new("id", ColumnType::Integer).primary_key())
                .column(Column::new("member_id", ColumnType::Integer).foreign_key("member", "id"))
                .column(Column::new("book_id", ColumnType::Integer).foreign_key("book", "id"))
                .column(Column::new("state", ColumnType::enumeration("loan_state"))),
        );

    println!("Created schema:");
    println!("  Entities: {}", schema.entity_count());

    // Render the schema to SVG using DiagramBuilder
    println!("Rendering to SVG...");
    let builder = DiagramBuilder::default();
    let svg = builder.render_svg(&schema)?;

    println!("SVG generated successfully!");
    println!("SVG length: {} bytes", svg.len());

    let output_path = "custom_schema_output.svg";
    std::fs::write(output_path, &svg)?;
    println!("SVG written to: {output_path}");

    Ok(())
}
