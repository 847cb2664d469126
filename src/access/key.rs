//! Structural member keys and parameter-signature hashing.

use std::any::TypeId;

use crate::value::ValueTy;

/// Immutable identity of a cached accessor.
///
/// Two logically identical members - same declaring class, same name, same
/// parameter types - always produce equal keys regardless of call order, which is
/// what makes the accessor cache's memoization idempotent.
///
/// Property keys fold the member name to lower case (property lookup is
/// case-insensitive); method keys keep the exact spelling (method lookup is
/// case-sensitive) and add a hash over the parameter signature so overloads get
/// distinct entries.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MemberKey {
    owner: TypeId,
    name: String,
    signature: u64,
}

impl MemberKey {
    /// Key for a property accessor on `owner`.
    #[must_use]
    pub fn property(owner: TypeId, name: &str) -> Self {
        MemberKey {
            owner,
            name: name.to_ascii_lowercase(),
            signature: 0,
        }
    }

    /// Key for a method accessor on `owner` with the given parameter signature.
    #[must_use]
    pub fn method(owner: TypeId, name: &str, params: &[ValueTy]) -> Self {
        MemberKey {
            owner,
            name: name.to_string(),
            signature: signature_hash(params),
        }
    }

    /// Key for the group of all same-named method overloads on `owner`.
    #[must_use]
    pub fn method_group(owner: TypeId, name: &str) -> Self {
        MemberKey {
            owner,
            name: name.to_string(),
            signature: u64::MAX,
        }
    }
}

/// Stable hash over a parameter-type signature.
///
/// FNV-1a style sequential mixing: each parameter contributes a shape tag and, for
/// structured types, its nested content, so overloads differing anywhere in the
/// signature hash apart while identical signatures always collide (by design).
#[must_use]
pub fn signature_hash(params: &[ValueTy]) -> u64 {
    let mut hash = SignatureHash::new();
    for param in params {
        hash.add_ty(param);
    }
    hash.finalize()
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

struct SignatureHash {
    state: u64,
}

impl SignatureHash {
    fn new() -> Self {
        SignatureHash { state: FNV_OFFSET }
    }

    fn mix(&mut self, byte: u8) {
        self.state ^= u64::from(byte);
        self.state = self.state.wrapping_mul(FNV_PRIME);
    }

    fn add_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.mix(*byte);
        }
    }

    fn add_ty(&mut self, ty: &ValueTy) {
        match ty {
            ValueTy::Bool => self.mix(1),
            ValueTy::I32 => self.mix(2),
            ValueTy::I64 => self.mix(3),
            ValueTy::F64 => self.mix(4),
            ValueTy::Str => self.mix(5),
            ValueTy::Seq(element) => {
                self.mix(6);
                self.add_ty(element);
            }
            ValueTy::Object(obj) => {
                self.mix(7);
                self.add_bytes(obj.name().as_bytes());
            }
            ValueTy::Nullable(inner) => {
                self.mix(8);
                self.add_ty(inner);
            }
            ValueTy::Any => self.mix(9),
        }
    }

    fn finalize(self) -> u64 {
        self.state
    }
}
