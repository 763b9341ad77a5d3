//! Typed row identifiers.
//!
//! Every table allocates `u32` ids; each record gets its own newtype so a
//! product id can never be passed where an order id is expected. Ids display
//! as `<record>_<n>`, e.g. `cart_item_3`.

use paste::paste;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_ids {
    ($($name:ident),* $(,)?) => {
        $(
            paste! {
                #[derive(
                    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
                )]
                #[serde(transparent)]
                pub struct [<$name Id>](pub u32);

                impl From<u32> for [<$name Id>] {
                    fn from(id: u32) -> Self {
                        Self(id)
                    }
                }

                impl fmt::Display for [<$name Id>] {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "{}_{}", stringify!([<$name:snake>]), self.0)
                    }
                }
            }
        )*
    };
}

record_ids!(
    User,
    Product,
    CartItem,
    Order,
    Wallet,
    Profile,
    Coupon,
    Review,
    CoinTransaction,
    StoredObject,
);
