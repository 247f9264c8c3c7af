// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field resolution: from a record type to its ordered column list.
//!
//! # Algorithm
//!
//! Breadth-first traversal from the root record. Each queue node is a record
//! type plus the path that reaches it; every type identity is expanded once,
//! which terminates cyclic graphs.
//!
//! ```text
//! member ──► skipped   private and not embedded, private embedded non-record, "-"
//!        ├─► inline    record typed, tagged inline: resolved recursively,
//!        │             leaves registered as prefix + name
//!        ├─► promoted  embedded record without explicit name: enqueued
//!        └─► leaf      everything else
//! ```
//!
//! Leaves compete by column name:
//!
//! 1. the shortest path wins;
//! 2. among equally short paths, explicitly named leaves win;
//! 3. if more than one candidate remains, the name is dropped.
//!
//! Survivors are sorted by path, which yields declaration order depth first.

use std::{
    any::{Any, TypeId},
    collections::{HashMap, HashSet, VecDeque, hash_map::Entry}
};

use crate::{
    error::{Error, Result},
    reflect::{FieldInfo, Getter, GetterMut, PointerInfo, TypeInfo},
    tag::Tag
};

/// One step from a record to one of its members.
#[derive(Clone)]
pub(crate) struct Access {
    get:     Getter,
    get_mut: GetterMut,
    derefs:  Vec<PointerInfo>
}

/// A resolved column: its annotation, declared type and location.
#[derive(Clone)]
pub struct ResolvedField {
    ty:     TypeInfo,
    tag:    Tag,
    path:   Vec<usize>,
    access: Vec<Access>
}

impl ResolvedField {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.tag.name
    }

    /// Parsed annotation.
    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Member indices from the root record to this field.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Declared type of the field.
    #[must_use]
    pub fn type_info(&self) -> &TypeInfo {
        &self.ty
    }

    /// Name of the declared type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Reads the field from a root record.
    ///
    /// Returns `None` when a pointer on the way is nil.
    pub(crate) fn get<'a>(&self, root: &'a dyn Any) -> Option<&'a dyn Any> {
        let mut current = root;
        for step in &self.access {
            current = (step.get)(current)?;
            for pointer in &step.derefs {
                current = (pointer.get)(current)?;
            }
        }
        Some(current)
    }

    /// Reaches the field for writing, allocating nil pointers on the way.
    pub(crate) fn get_mut<'a>(&self, root: &'a mut dyn Any) -> Result<&'a mut dyn Any> {
        let mut current = root;
        for step in &self.access {
            current = (step.get_mut)(current).ok_or_else(|| self.mismatch())?;
            for pointer in &step.derefs {
                current = (pointer.materialize)(current).ok_or_else(|| self.mismatch())?;
            }
        }
        Ok(current)
    }

    fn mismatch(&self) -> Error {
        Error::Mismatch {
            type_name: self.ty.name()
        }
    }
}

impl std::fmt::Debug for ResolvedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedField")
            .field("name", &self.tag.name)
            .field("path", &self.path)
            .field("type", &self.ty.name())
            .field("omit_empty", &self.tag.omit_empty)
            .finish()
    }
}

/// Resolves the columns of a record type for a tag namespace.
pub(crate) fn resolve(root: &TypeInfo, namespace: &str) -> Vec<ResolvedField> {
    let mut inlining = vec![root.id()];
    build(root, namespace, &mut inlining)
}

struct Node {
    ty:     TypeInfo,
    path:   Vec<usize>,
    access: Vec<Access>
}

enum Member {
    Leaf(TypeInfo, Tag),
    Inline(TypeInfo, Vec<PointerInfo>, Tag),
    Promote(TypeInfo, Vec<PointerInfo>)
}

fn classify(field: &FieldInfo, namespace: &str) -> Option<Member> {
    if !field.exported && !field.embedded {
        return None;
    }
    let ty = (field.ty)();
    let (target, derefs) = ty.deref();
    let is_struct = target.is_struct();
    if field.embedded && !field.exported && !is_struct {
        return None;
    }

    let tag = Tag::parse(field.tag(namespace), field.name, is_struct);
    if tag.ignore {
        return None;
    }
    if tag.inline {
        return Some(Member::Inline(target, derefs, tag));
    }
    if field.embedded && tag.empty && is_struct {
        return Some(Member::Promote(target, derefs));
    }
    Some(Member::Leaf(ty, tag))
}

/// Resolves one record; `inlining` holds the records currently being inlined.
fn build(root: &TypeInfo, namespace: &str, inlining: &mut Vec<TypeId>) -> Vec<ResolvedField> {
    let mut queue = VecDeque::from([Node {
        ty:     root.clone(),
        path:   Vec::new(),
        access: Vec::new()
    }]);
    let mut visited = HashSet::new();
    let mut names = NameMap::default();

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node.ty.id()) {
            continue;
        }

        // Same type reached through other paths at this depth.
        let depth = node.path.len();
        let twins: Vec<(Vec<usize>, Vec<Access>)> = queue
            .iter()
            .take_while(|other| other.path.len() == depth)
            .filter(|other| other.ty.id() == node.ty.id())
            .map(|other| (other.path.clone(), other.access.clone()))
            .collect();
        let origins: Vec<(Vec<usize>, Vec<Access>)> = std::iter::once((node.path, node.access))
            .chain(twins)
            .collect();

        for (index, field) in node.ty.fields().iter().enumerate() {
            let Some(member) = classify(field, namespace) else {
                continue;
            };
            match member {
                Member::Leaf(ty, tag) => {
                    for (path, access) in &origins {
                        names.insert(ResolvedField {
                            ty: ty.clone(),
                            tag: tag.clone(),
                            path: extend(path, index),
                            access: step(access, field, Vec::new())
                        });
                    }
                }
                Member::Promote(target, derefs) => {
                    for (path, access) in &origins {
                        queue.push_back(Node {
                            ty:     target.clone(),
                            path:   extend(path, index),
                            access: step(access, field, derefs.clone())
                        });
                    }
                }
                Member::Inline(target, derefs, tag) => {
                    if inlining.contains(&target.id()) {
                        continue;
                    }
                    inlining.push(target.id());
                    let inner = build(&target, namespace, inlining);
                    inlining.pop();

                    for (path, access) in &origins {
                        let outer_path = extend(path, index);
                        let outer_access = step(access, field, derefs.clone());
                        for leaf in &inner {
                            let mut leaf_tag = leaf.tag.clone();
                            leaf_tag.name = format!("{}{}", tag.prefix, leaf.tag.name);
                            names.insert(ResolvedField {
                                ty:     leaf.ty.clone(),
                                tag:    leaf_tag,
                                path:   outer_path.iter().chain(&leaf.path).copied().collect(),
                                access: outer_access.iter().chain(&leaf.access).cloned().collect()
                            });
                        }
                    }
                }
            }
        }
    }

    names.finish()
}

fn extend(path: &[usize], index: usize) -> Vec<usize> {
    let mut path = path.to_vec();
    path.push(index);
    path
}

fn step(access: &[Access], field: &FieldInfo, derefs: Vec<PointerInfo>) -> Vec<Access> {
    let mut access = access.to_vec();
    access.push(Access {
        get: field.get,
        get_mut: field.get_mut,
        derefs
    });
    access
}

/// Per-name candidate buckets.
#[derive(Default)]
struct NameMap {
    buckets: HashMap<String, Vec<ResolvedField>>
}

impl NameMap {
    fn insert(&mut self, field: ResolvedField) {
        match self.buckets.entry(field.tag.name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(vec![field]);
            }
            Entry::Occupied(mut entry) => {
                let bucket = entry.get_mut();
                let shortest = bucket[0].path.len();
                if field.path.len() > shortest {
                    return;
                }
                if field.path.len() < shortest {
                    *bucket = vec![field];
                } else if field.tag.empty {
                    bucket.push(field);
                } else {
                    bucket.insert(0, field);
                }
            }
        }
    }

    fn finish(self) -> Vec<ResolvedField> {
        let mut fields: Vec<ResolvedField> = self
            .buckets
            .into_values()
            .filter_map(|mut bucket| {
                let implicit = bucket[0].tag.empty;
                let keep = bucket
                    .iter()
                    .take_while(|field| field.tag.empty == implicit)
                    .count();
                bucket.truncate(keep);
                if bucket.len() == 1 { bucket.pop() } else { None }
            })
            .collect();
        fields.sort_by(|a, b| a.path.cmp(&b.path));
        fields
    }
}
