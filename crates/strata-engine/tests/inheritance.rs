//! Transitive inheritance over the group graph.

mod common;

use common::{harness, node};
use strata_engine::Contexts;
use strata_node::{ContextSet, Node, Tristate};

#[test]
fn inherited_nodes_carry_their_origin() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_inherit_group(&admin, None, None, None).expect("inherit");

    let all = user.resolve_all(None, &Contexts::allow_all());
    let fly = all
        .iter()
        .find(|ln| ln.node().permission() == "fly")
        .expect("inherited node present");
    assert_eq!(fly.location(), "admin");

    let own = all
        .iter()
        .find(|ln| ln.node().permission() == "group.admin")
        .expect("own group node present");
    assert_eq!(own.location(), user.object_name());
}

#[test]
fn cyclic_graph_terminates_with_each_group_once() {
    let fx = harness();
    let a = fx.group("a");
    let b = fx.group("b");
    a.set_permission(node("group.b")).expect("a inherits b");
    b.set_permission(node("group.a")).expect("b inherits a");

    let user = fx.user();
    user.set_permission(node("group.a")).expect("user inherits a");

    let all = user.resolve_all(None, &Contexts::allow_all());
    let group_a = all.iter().filter(|ln| ln.node().permission() == "group.a").count();
    let group_b = all.iter().filter(|ln| ln.node().permission() == "group.b").count();
    assert_eq!(group_a, 1);
    assert_eq!(group_b, 1);
}

#[test]
fn self_referencing_group_terminates() {
    let fx = harness();
    let staff = fx.group("staff");
    staff.set_permission(node("group.staff")).expect("self reference");
    staff.set_permission(node("kick")).expect("set");

    let all = staff.resolve_all(None, &Contexts::allow_all());
    assert_eq!(all.iter().filter(|ln| ln.node().permission() == "kick").count(), 1);
}

#[test]
fn deep_chain_resolves_transitively() {
    let fx = harness();
    let low = fx.group("low");
    let mid = fx.group("mid");
    let high = fx.group("high");
    low.set_permission(node("base")).expect("set");
    mid.set_permission(node("group.low")).expect("set");
    mid.set_permission(node("extra")).expect("set");
    high.set_permission(node("group.mid")).expect("set");

    let user = fx.user();
    user.set_inherit_group(&high, None, None, None).expect("inherit");

    let perms = user.export_permissions(&Contexts::allow_all(), false);
    assert_eq!(perms.get("base"), Some(&true));
    assert_eq!(perms.get("extra"), Some(&true));
}

#[test]
fn unknown_group_is_skipped_silently() {
    let fx = harness();
    let user = fx.user();
    user.set_permission(node("group.ghost")).expect("set");
    user.set_permission(node("real")).expect("set");

    let all = user.resolve_all(None, &Contexts::allow_all());
    assert_eq!(all.len(), 2); // group.ghost + real, nothing inherited
}

#[test]
fn child_assertion_wins_over_inherited_equivalent() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_permission(node("fly")).expect("set own");
    user.set_inherit_group(&admin, None, None, None).expect("inherit");

    let all = user.resolve_all(None, &Contexts::allow_all());
    let fly: Vec<_> = all
        .iter()
        .filter(|ln| ln.node().permission() == "fly")
        .collect();
    // First seen wins: the holder's own node survives, the group's copy
    // is dropped during the merge.
    assert_eq!(fly.len(), 1);
    assert_eq!(fly[0].location(), user.object_name());
}

#[test]
fn child_deny_overrides_inherited_grant_in_filtered_view() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("grant on group");

    let user = fx.user();
    user.set_permission(Node::builder("fly").value(false).build().expect("build node"))
        .expect("deny on user");
    user.set_inherit_group(&admin, None, None, None).expect("inherit");

    let perms = user.export_permissions(&Contexts::allow_all(), false);
    assert_eq!(perms.get("fly"), Some(&false));
}

#[test]
fn denied_group_node_selects_no_parent() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_permission(Node::builder("group.admin").value(false).build().expect("build node"))
        .expect("deny inheritance");

    let perms = user.export_permissions(&Contexts::allow_all(), false);
    assert_eq!(perms.get("fly"), None);
}

#[test]
fn server_bound_group_node_needs_matching_context() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_inherit_group(&admin, Some("s1"), None, None).expect("inherit on s1");

    let on_s1 = Contexts::new(ContextSet::new().with("server", "s1"));
    let on_s2 = Contexts::new(ContextSet::new().with("server", "s2"));

    assert_eq!(user.export_permissions(&on_s1, false).get("fly"), Some(&true));
    assert_eq!(user.export_permissions(&on_s2, false).get("fly"), None);
}

#[test]
fn global_group_nodes_obey_apply_global_groups() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_inherit_group(&admin, None, None, None).expect("inherit");

    let walk_global = Contexts::allow_all();
    let skip_global = Contexts::allow_all().with_apply_global_groups(false);

    assert_eq!(
        user.export_permissions(&walk_global, false).get("fly"),
        Some(&true)
    );
    assert_eq!(user.export_permissions(&skip_global, false).get("fly"), None);
}

#[test]
fn apply_groups_off_keeps_only_own_nodes() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_permission(node("own")).expect("set");
    user.set_inherit_group(&admin, None, None, None).expect("inherit");

    let ctx = Contexts::allow_all().with_apply_groups(false);
    let perms = user.export_permissions(&ctx, false);
    assert_eq!(perms.get("own"), Some(&true));
    assert_eq!(perms.get("fly"), None);
}

#[test]
fn caller_supplied_exclusions_are_honored() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_inherit_group(&admin, None, None, None).expect("inherit");

    let excluded = vec!["admin".to_string()];
    let all = user.resolve_all(Some(&excluded), &Contexts::allow_all());
    assert!(all.iter().all(|ln| ln.node().permission() != "fly"));
    // The caller's list is untouched.
    assert_eq!(excluded, vec!["admin".to_string()]);
}

#[test]
fn inherits_node_reports_origin_group() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_inherit_group(&admin, None, None, None).expect("inherit");

    let info = user.inherits_node_info(&node("fly"));
    assert_eq!(info.result(), Tristate::True);
    assert_eq!(info.location(), Some("admin"));

    assert!(user.inherits_node_value("fly", true));
    assert_eq!(user.inherits_node(&node("missing")), Tristate::Undefined);
}

#[test]
fn inherits_group_matches_resolution() {
    let fx = harness();
    let admin = fx.group("admin");
    let user = fx.user();

    assert!(!user.inherits_group(&admin, None, None));
    user.set_inherit_group(&admin, None, None, None).expect("inherit");
    assert!(user.inherits_group(&admin, None, None));
    assert!(user.inherits_node_value("group.admin", true));

    user.unset_inherit_group(&admin, None, None, false).expect("uninherit");
    assert!(!user.inherits_group(&admin, None, None));
}

#[test]
fn diamond_inheritance_keeps_one_copy() {
    let fx = harness();
    let base = fx.group("base");
    let left = fx.group("left");
    let right = fx.group("right");
    base.set_permission(node("common")).expect("set");
    left.set_permission(node("group.base")).expect("set");
    right.set_permission(node("group.base")).expect("set");

    let user = fx.user();
    user.set_inherit_group(&left, None, None, None).expect("inherit left");
    user.set_inherit_group(&right, None, None, None).expect("inherit right");

    let all = user.resolve_all(None, &Contexts::allow_all());
    assert_eq!(
        all.iter().filter(|ln| ln.node().permission() == "common").count(),
        1
    );
    // First-visited parent supplied it.
    let common = all
        .iter()
        .find(|ln| ln.node().permission() == "common")
        .expect("inherited");
    assert_eq!(common.location(), "base");
}

#[test]
fn group_mutation_invalidates_inheriting_views_on_next_walk() {
    let fx = harness();
    let admin = fx.group("admin");
    admin.set_permission(node("fly")).expect("set on group");

    let user = fx.user();
    user.set_inherit_group(&admin, None, None, None).expect("inherit");
    assert_eq!(
        user.export_permissions(&Contexts::allow_all(), false).get("fly"),
        Some(&true)
    );

    admin.unset_permission(&node("fly")).expect("unset on group");
    // Walks pull fresh snapshots from each visited holder.
    assert_eq!(
        user.export_permissions(&Contexts::allow_all(), false).get("fly"),
        None
    );
}
