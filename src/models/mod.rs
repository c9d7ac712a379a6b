//! Models are the data structures the studio core works with: the pieces it
//! prices and the users that own them.
//!
//! Models are never edited in place. Transactions hand back a set of
//! [Modifications] describing what should be created or deleted, and the
//! caller applies those to storage.
//!
//! [Modifications]: struct.Modifications.html

#[macro_use]
pub(crate) mod lib;

use crate::error::{Error, Result};
use serde::Serialize;
use std::convert::TryFrom;

/// A macro that standardizes including, exporting, and creating wrapper type(s)
/// for our models.
macro_rules! load_models {
    (
        @pub mod
        $( ($path:ident, $($_rest:tt)*), )*
    ) => {
        $(
            pub mod $path;
        )*
    };

    // create an enum that wraps our models in CUD
    (
        @pub enum $enumname:ident
        $( ($path:ident, $model:ident, $($_extratypes:ident),*), )*
    ) => {
        /// An enum that allows returning *any* model type. This is mainly used
        /// along with [Op](enum.Op.html) to specify modifications (ie
        /// `[Op::Create, Piece]`).
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub enum $enumname {
            $(
                $model(crate::models::$path::$model),
            )*
        }

        $(
            impl From<crate::models::$path::$model> for $enumname {
                fn from(val: crate::models::$path::$model) -> Self {
                    $enumname::$model(val)
                }
            }

            impl TryFrom<$enumname> for crate::models::$path::$model {
                type Error = Error;

                fn try_from(val: $enumname) -> Result<Self> {
                    match val {
                        $enumname::$model(model) => Ok(model),
                        #[allow(unreachable_patterns)]
                        _ => Err(Error::WrongModelType),
                    }
                }
            }
        )*
    };

    // entry point
    ($($load_type:tt)*) => {
        load_models! {
            @$($load_type)*
            (user, User, UserID),
            (piece, Piece, PieceID),
        }
    };
}

load_models! { pub mod }
load_models! { pub enum Model }

pub mod record;

/// A type for determining if a model should be created or deleted.
///
/// There's no update: pieces are deleted and re-added instead of edited.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Op {
    #[serde(rename = "create")]
    Create,
    #[serde(rename = "delete")]
    Delete,
}

/// Wraps a model and an operation together, the output of a transaction.
#[derive(Clone, Debug, PartialEq, getset::Getters, Serialize)]
#[getset(get = "pub")]
pub struct Modification {
    /// The operation to perform
    op: Op,
    /// The model we're operating on
    model: Model,
}

impl Modification {
    /// Create a new modification
    pub fn new(op: Op, model: Model) -> Self {
        Self { op, model }
    }

    /// Consume this modification, returning the op and model
    pub fn into_pair(self) -> (Op, Model) {
        (self.op, self.model)
    }

    /// Grab the model out of this modification, making sure the op is the one
    /// we expect and the model is the type we expect.
    pub fn expect_op<T: TryFrom<Model, Error = Error>>(self, verify_op: Op) -> Result<T> {
        let (op, model) = self.into_pair();
        if op != verify_op {
            Err(Error::OpMismatch)?;
        }
        T::try_from(model)
    }
}

/// A list of modifications, returned by all transactions.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Modifications {
    modifications: Vec<Modification>,
}

impl Modifications {
    /// Create an empty modification set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a modification set with a single entry
    pub fn new_single<T: Into<Model>>(op: Op, model: T) -> Self {
        let mut mods = Self::new();
        mods.push(op, model);
        mods
    }

    /// Add a modification to the list
    pub fn push<T: Into<Model>>(&mut self, op: Op, model: T) {
        self.modifications.push(Modification::new(op, model.into()));
    }

    pub fn len(&self) -> usize {
        self.modifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }

    /// Consume the set, returning the raw list
    pub fn into_vec(self) -> Vec<Modification> {
        self.modifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            piece::Piece,
            user::{User, UserID},
        },
        util::test::*,
    };

    #[test]
    fn expect_op_checks_op_and_type() {
        let piece = make_piece("Ana", "01/01/2024");
        let mods = Modifications::new_single(Op::Create, piece.clone());
        assert_eq!(mods.len(), 1);
        let modification = mods.into_vec()[0].clone();

        assert_eq!(modification.clone().expect_op::<Piece>(Op::Create), Ok(piece));
        assert_eq!(modification.clone().expect_op::<Piece>(Op::Delete), Err(Error::OpMismatch));
        assert_eq!(modification.expect_op::<User>(Op::Create), Err(Error::WrongModelType));
    }

    #[test]
    fn pushes_in_order() {
        let mut mods = Modifications::new();
        assert!(mods.is_empty());
        mods.push(Op::Create, make_user(&UserID::new("u-1")));
        mods.push(Op::Delete, make_piece("Bea", "02/01/2024"));
        let list = mods.into_vec();
        assert_eq!(list[0].op(), &Op::Create);
        assert_eq!(list[1].op(), &Op::Delete);
    }
}
