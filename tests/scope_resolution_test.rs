// ABOUTME: Property tests for permission-to-scope resolution across every built-in provider
// ABOUTME: Determinism, separator hygiene, first-occurrence dedup, custom fallback and plugin scopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use proptest::prelude::*;
use socialgate::providers::{builtin_descriptors, resolve_scope};
use socialgate_core::models::Permission;
use std::collections::HashSet;

fn permission() -> impl Strategy<Value = Permission> {
    prop_oneof![
        Just(Permission::AuthenticateOnly),
        Just(Permission::All),
        Just(Permission::Custom),
    ]
}

fn custom_scopes() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z_. ,]{0,40}")
}

fn plugin_scopes() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(vec!["user_posts", "tweet.read", "basic", "email"], 0..=4)
}

proptest! {
    #[test]
    fn resolution_is_deterministic_and_well_formed(
        index in 0usize..4,
        permission in permission(),
        custom in custom_scopes(),
        plugins in plugin_scopes(),
    ) {
        let descriptors = builtin_descriptors();
        let descriptor = descriptors[index % descriptors.len()].as_ref();

        let first = resolve_scope(descriptor, permission, custom.as_deref(), &plugins);
        let second = resolve_scope(descriptor, permission, custom.as_deref(), &plugins);

        prop_assert_eq!(&first, &second);
        prop_assert!(!first.is_empty());
        prop_assert!(!first.starts_with(','));
        prop_assert!(!first.ends_with(','));
        prop_assert!(!first.contains(",,"));

        let parts: Vec<&str> = first.split(',').collect();
        let unique: HashSet<&str> = parts.iter().copied().collect();
        prop_assert_eq!(parts.len(), unique.len());
        for scope in &plugins {
            prop_assert!(unique.contains(scope));
        }
    }

    #[test]
    fn custom_without_usable_scopes_resolves_as_all(
        index in 0usize..4,
        blanks in "[ ,]{0,10}",
    ) {
        let descriptors = builtin_descriptors();
        let descriptor = descriptors[index % descriptors.len()].as_ref();

        prop_assert_eq!(
            resolve_scope(descriptor, Permission::Custom, Some(blanks.as_str()), &[]),
            resolve_scope(descriptor, Permission::All, None, &[])
        );
        prop_assert_eq!(
            resolve_scope(descriptor, Permission::Custom, None, &[]),
            resolve_scope(descriptor, Permission::All, None, &[])
        );
    }
}

#[test]
fn custom_scopes_keep_order_and_first_occurrence() {
    let descriptors = builtin_descriptors();
    let facebook = descriptors
        .iter()
        .find(|d| d.name() == "facebook")
        .unwrap()
        .as_ref();

    let scope = resolve_scope(
        facebook,
        Permission::Custom,
        Some(" read_stream , email,read_stream,, "),
        &["user_posts", "email"],
    );

    assert_eq!(scope, "read_stream,email,user_posts");
}

#[test]
fn authenticate_only_is_a_subset_of_all() {
    for descriptor in builtin_descriptors() {
        let all: HashSet<String> = resolve_scope(descriptor.as_ref(), Permission::All, None, &[])
            .split(',')
            .map(str::to_owned)
            .collect();
        let auth = resolve_scope(descriptor.as_ref(), Permission::AuthenticateOnly, None, &[]);
        for scope in auth.split(',') {
            assert!(all.contains(scope), "{}: {scope} missing from ALL", descriptor.name());
        }
    }
}
