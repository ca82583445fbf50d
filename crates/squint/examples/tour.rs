//! Walk squint's surface on a small object graph.
//!
//! Run with: `cargo run -p squint --example tour`
//! Set `RUST_LOG=squint=trace` to watch reference discovery happen.

use squint::{at, DEFAULT_MAX_DEPTH};
use squint_obj::{InstanceValue, Obj};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let session = Obj::instance(
        InstanceValue::new("app.auth", "Session")
            .with_attr("token", Obj::string("3f9a8c1d"))
            .with_attr("ttl", Obj::int(3600)),
    );
    let user = Obj::instance(
        InstanceValue::new("app.models", "User")
            .with_attr("name", Obj::string("ada"))
            .with_attr("groups", Obj::list(vec![Obj::string("admin"), Obj::string("ops")]))
            .with_attr("session", session.clone()),
    );
    session.set_attr("user", user.clone());

    let wrapper = at(user);

    println!("plain:\n{}\n", wrapper.render());
    println!("verbose:\n{}\n", wrapper.render_verbose());
    println!("cycles:\n{}", wrapper.find_cycles(DEFAULT_MAX_DEPTH));

    if let Ok(groups) = wrapper.get("a_groups") {
        println!("\ngroups:\n{groups}");
    }
}
