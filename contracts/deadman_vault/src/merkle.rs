//! Binary Merkle commitments for the claim channel.
//!
//! ## Hashing convention
//! | Kind | Pre-image                                              |
//! |------|--------------------------------------------------------|
//! | Leaf | `xdr(claimant) ‖ amount as 16-byte big-endian`         |
//! | Node | `min(a, b) ‖ max(a, b)` (byte-wise order of the hashes) |
//!
//! All hashes are Keccak-256. Sorting each pair means a proof is just the
//! list of sibling hashes from leaf to root, with no direction bits. When a
//! level has an odd number of nodes the last one is promoted unchanged, so
//! its proof has no sibling at that level.
//!
//! [`build_root`] and [`build_proof`] are the tooling side of the same
//! convention; the contract itself only calls [`claim_leaf`] and [`verify`].

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

pub type NodeHash = BytesN<32>;

/// Longest accepted proof (enough for 2^64 leaves).
pub const MAX_PROOF_DEPTH: u32 = 64;

pub fn claim_leaf(env: &Env, claimant: &Address, amount: i128) -> NodeHash {
    let mut data: Bytes = claimant.clone().to_xdr(env);
    data.extend_from_array(&amount.to_be_bytes());
    env.crypto().keccak256(&data).into()
}

pub fn hash_pair(env: &Env, a: &NodeHash, b: &NodeHash) -> NodeHash {
    let (a, b) = (a.to_array(), b.to_array());
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut combined = Bytes::new(env);
    combined.extend_from_array(&left);
    combined.extend_from_array(&right);
    env.crypto().keccak256(&combined).into()
}

pub fn verify(env: &Env, root: &NodeHash, leaf: &NodeHash, proof: &Vec<NodeHash>) -> bool {
    if proof.len() > MAX_PROOF_DEPTH {
        return false;
    }
    let mut current = leaf.clone();
    for sibling in proof.iter() {
        current = hash_pair(env, &current, &sibling);
    }
    &current == root
}

fn next_level(env: &Env, level: &Vec<NodeHash>) -> Vec<NodeHash> {
    let mut next = Vec::new(env);
    let mut i = 0u32;
    while i < level.len() {
        match (level.get(i), level.get(i + 1)) {
            (Some(left), Some(right)) => next.push_back(hash_pair(env, &left, &right)),
            (Some(odd), None) => next.push_back(odd),
            _ => {}
        }
        i += 2;
    }
    next
}

/// Root over `leaves` in the given order, or `None` for an empty set.
pub fn build_root(env: &Env, leaves: &Vec<NodeHash>) -> Option<NodeHash> {
    let mut level = leaves.clone();
    while level.len() > 1 {
        level = next_level(env, &level);
    }
    level.get(0)
}

/// Sibling path for the leaf at `index`, or `None` if out of range.
pub fn build_proof(env: &Env, leaves: &Vec<NodeHash>, index: u32) -> Option<Vec<NodeHash>> {
    if index >= leaves.len() {
        return None;
    }
    let mut proof = Vec::new(env);
    let mut level = leaves.clone();
    let mut idx = index;
    while level.len() > 1 {
        if let Some(sibling) = level.get(idx ^ 1) {
            proof.push_back(sibling);
        }
        level = next_level(env, &level);
        idx /= 2;
    }
    Some(proof)
}
