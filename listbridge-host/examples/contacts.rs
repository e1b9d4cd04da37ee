use listbridge::{BridgeOptions, ListBridge, ListBuilder, TemplateDeclaration};
use listbridge_host::{Node, RecyclingHost, TreeEngine};

struct Contact {
    name: String,
    favorite: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build with `--features tracing` and set RUST_LOG=listbridge=trace to watch slots being
    // created and reused.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let contacts: Vec<Contact> = (0..1000)
        .map(|i| Contact {
            name: format!("contact #{i}"),
            favorite: i % 7 == 0,
        })
        .collect();

    let mut host = RecyclingHost::new(contacts);
    let mut builder: ListBuilder<Contact, TreeEngine> =
        ListBridge::builder(BridgeOptions::new().with_alias("contact"));
    {
        // Child template declarations only ever see the scope.
        let mut scope = builder.scope();
        scope.declare(
            TemplateDeclaration::<Contact, Node>::new()
                .with_name("favorite")
                .with_if(|ctx| ctx.item().favorite)
                .with_render(|ctx| {
                    Node::new("card")
                        .with_child(Node::label("★"))
                        .with_child(Node::label(ctx.item().name.clone()))
                }),
        );
        scope.declare(TemplateDeclaration::<Contact, Node>::new().with_render(|ctx| {
            Node::new("row")
                .with_attr("stripe", if ctx.is_even() { "light" } else { "dark" })
                .with_child(Node::label(ctx.item().name.clone()))
        }));
    }
    let mut bridge = builder.finish(&mut host);
    let mut engine = TreeEngine::new();

    // Scroll through the whole list with a 12-row window.
    for start in 0..=988 {
        host.show(start..start + 12, &mut bridge, &mut engine)?;
    }

    println!(
        "rendered 1000 contacts with {} native containers ({} slots, {} native nodes created)",
        engine.container_count(),
        bridge.slots().len(),
        engine.created_nodes(),
    );
    for (index, key, view) in host.rows() {
        let text = engine
            .view(view)
            .and_then(|node| node.children.last())
            .and_then(|label| label.attr("text"))
            .unwrap_or("<stale>");
        println!("{index:>4} [{key}] {text}");
    }
    Ok(())
}
