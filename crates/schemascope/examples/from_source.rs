//! Example: Visualizing a GraphQL schema from SDL source
//!
//! Parses the schema into a catalog, projects it into a graph and prints
//! the graph as JSON for a renderer to consume.

use schemascope::Schemascope;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = r#"
        interface Node { id: ID! }

        type User implements Node {
            id: ID!
            name: String!
        }

        type Post implements Node {
            id: ID!
            author: User!
        }

        type Query {
            me: User
            feed(first: Int = 10): [Post!]!
        }
    "#;

    let scope = Schemascope::default();

    println!("Parsing schema...");
    let catalog = scope.parse(source)?;
    println!("Catalog holds {} types", catalog.len());

    let graph = scope.project(&catalog);
    println!(
        "Graph has {} nodes and {} edges\n",
        graph.nodes().len(),
        graph.edges().len()
    );

    println!("{}", serde_json::to_string_pretty(&graph)?);

    Ok(())
}
