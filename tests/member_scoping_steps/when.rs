//! When steps for member task scoping scenarios.

use super::world::{ScopingWorld, document_with_tasks, run_async};
use atelier::role::domain::UserEmail;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{email}" reads the workspace state"#)]
fn reads_state(world: &mut ScopingWorld, email: String) -> Result<(), eyre::Report> {
    let scope = world.scope()?.clone();
    let caller = run_async(world.services.roles().resolve_caller(&scope, Some(email.as_str())));
    let snapshot =
        run_async(world.services.states().get(&scope, &caller)).wrap_err("read workspace state")?;
    world.last_snapshot = Some(snapshot);
    Ok(())
}

#[when(r#""{email}" saves tasks assigned to "{list}""#)]
fn saves_tasks(world: &mut ScopingWorld, email: String, list: String) -> Result<(), eyre::Report> {
    let scope = world.scope()?.clone();
    let caller = run_async(world.services.roles().resolve_caller(&scope, Some(email.as_str())));
    let snapshot = run_async(
        world
            .services
            .states()
            .put(&scope, document_with_tasks(&list), &caller),
    )
    .wrap_err("write workspace state")?;
    world.last_snapshot = Some(snapshot);
    Ok(())
}

#[when(r#"the role of "{email}" is removed"#)]
fn role_removed(world: &mut ScopingWorld, email: String) -> Result<(), eyre::Report> {
    let scope = world.scope()?.clone();
    let user_email = UserEmail::new(email).wrap_err("parse user email")?;
    run_async(world.services.roles().remove(&scope, &user_email)).wrap_err("remove role")?;
    Ok(())
}
