//! Property tests over generated schemas.

use proptest::prelude::*;

use schemascope::{Schemascope, graph::SchemaGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Object,
    Interface,
    Enum,
}

#[derive(Debug, Clone)]
struct GeneratedType {
    name: String,
    kind: Kind,
    /// Indices of the types referenced by this type's fields
    refs: Vec<usize>,
    /// Wrapper style per field: 0 plain, 1 non-null, 2 `[T!]!`
    wrappers: Vec<u8>,
}

impl GeneratedType {
    fn is_composite(&self) -> bool {
        self.kind != Kind::Enum
    }
}

fn wrap(name: &str, wrapper: u8) -> String {
    match wrapper {
        0 => name.to_string(),
        1 => format!("{name}!"),
        _ => format!("[{name}!]!"),
    }
}

fn render(types: &[GeneratedType]) -> String {
    let mut source = String::new();
    for ty in types {
        match ty.kind {
            Kind::Enum => source.push_str(&format!("enum {} {{ A B }}\n", ty.name)),
            Kind::Object | Kind::Interface => {
                let keyword = if ty.kind == Kind::Object { "type" } else { "interface" };
                source.push_str(&format!("{keyword} {} {{ id: ID", ty.name));
                for (field, (target, wrapper)) in ty.refs.iter().zip(&ty.wrappers).enumerate() {
                    let target_name = &types[*target].name;
                    source.push_str(&format!(" f{field}: {}", wrap(target_name, *wrapper)));
                }
                source.push_str(" }\n");
            }
        }
    }
    source
}

fn schema_strategy() -> impl Strategy<Value = Vec<GeneratedType>> {
    (1usize..12)
        .prop_flat_map(|count| {
            let ty = (
                prop_oneof![
                    3 => Just(Kind::Object),
                    1 => Just(Kind::Interface),
                    1 => Just(Kind::Enum),
                ],
                prop::collection::vec((0..count, 0u8..3), 0..4),
                any::<bool>(),
            );
            prop::collection::vec(ty, count)
        })
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (kind, fields, reserved))| {
                    let prefix = if reserved { "__" } else { "" };
                    let (refs, wrappers) = fields.into_iter().unzip();
                    GeneratedType {
                        name: format!("{prefix}T{index}"),
                        kind,
                        refs,
                        wrappers,
                    }
                })
                .collect()
        })
}

/// Edges the projection must produce, as (source, target) names.
fn expected_edges(types: &[GeneratedType]) -> Vec<(String, String)> {
    let visible = |ty: &GeneratedType| ty.is_composite() && !ty.name.starts_with("__");

    let mut edges = Vec::new();
    for (index, ty) in types.iter().enumerate() {
        if !visible(ty) {
            continue;
        }
        for target in &ty.refs {
            let target_ty = &types[*target];
            if *target < index && visible(target_ty) {
                edges.push((ty.name.clone(), target_ty.name.clone()));
            }
        }
    }
    edges
}

fn edge_names(graph: &SchemaGraph) -> Vec<(String, String)> {
    graph
        .edges()
        .iter()
        .map(|edge| {
            let name = |id| graph.node(id).unwrap().display_name().to_string();
            (name(edge.source()), name(edge.target()))
        })
        .collect()
}

proptest! {
    #[test]
    fn projection_is_deterministic(types in schema_strategy()) {
        let source = render(&types);
        let scope = Schemascope::default();
        let first = scope.visualize(&source).unwrap();
        let second = scope.visualize(&source).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn ids_are_dense_and_follow_declaration_order(types in schema_strategy()) {
        let graph = Schemascope::default().visualize(&render(&types)).unwrap();

        let expected: Vec<_> = types
            .iter()
            .filter(|ty| ty.is_composite() && !ty.name.starts_with("__"))
            .map(|ty| ty.name.as_str())
            .collect();
        let names: Vec<_> = graph.nodes().iter().map(|node| node.display_name()).collect();
        prop_assert_eq!(names, expected);

        for (index, node) in graph.nodes().iter().enumerate() {
            prop_assert_eq!(node.id().index(), index);
        }
    }

    #[test]
    fn reserved_names_and_self_loops_never_appear(types in schema_strategy()) {
        let graph = Schemascope::default().visualize(&render(&types)).unwrap();

        for node in graph.nodes() {
            prop_assert!(!node.display_name().starts_with("__"));
        }
        for edge in graph.edges() {
            prop_assert_ne!(edge.source(), edge.target());
        }
    }

    #[test]
    fn edges_exist_only_for_earlier_composite_targets(types in schema_strategy()) {
        let graph = Schemascope::default().visualize(&render(&types)).unwrap();
        prop_assert_eq!(edge_names(&graph), expected_edges(&types));
    }

    #[test]
    fn every_edge_points_backwards(types in schema_strategy()) {
        let graph = Schemascope::default().visualize(&render(&types)).unwrap();
        for edge in graph.edges() {
            prop_assert!(edge.target() < edge.source());
        }
    }
}
