use std::collections::{HashMap, HashSet};

use crate::models::{CommentId, CommentRecord, GroupedComment};

/// Promotes every record whose parent is missing from the batch, or is itself
/// a reply, to a top-level comment.
pub fn normalize(records: &[CommentRecord]) -> Vec<CommentRecord> {
    let roots: HashSet<CommentId> = records
        .iter()
        .filter(|r| r.is_top_level())
        .map(|r| r.id)
        .collect();

    records
        .iter()
        .map(|r| match r.parent_id {
            Some(parent) if roots.contains(&parent) => r.clone(),
            _ => r.clone().into_top_level(),
        })
        .collect()
}

// 保持原有顺序；父评论未知的回复被丢弃，normalize 之后不会出现
pub fn group(records: &[CommentRecord]) -> Vec<GroupedComment> {
    let mut threads: Vec<GroupedComment> = Vec::new();
    let mut slots: HashMap<CommentId, usize> = HashMap::new();

    for r in records.iter().filter(|r| r.is_top_level()) {
        // 重复 ID 时回复挂到第一个
        slots.entry(r.id).or_insert(threads.len());
        threads.push(GroupedComment::new(r.clone()));
    }

    for r in records.iter().filter(|r| !r.is_top_level()) {
        let slot = r.parent_id.and_then(|parent| slots.get(&parent).copied());
        if let Some(slot) = slot {
            threads[slot].replies.push(r.clone());
        }
    }

    threads
}

pub fn build_thread(records: &[CommentRecord]) -> Vec<GroupedComment> {
    group(&normalize(records))
}

pub fn find_comment(threads: &[GroupedComment], id: CommentId) -> Option<&CommentRecord> {
    threads.iter().find_map(|t| t.find(id))
}
