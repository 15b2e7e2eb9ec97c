//! Conversions between proto messages and domain types.

use inventory::Item;

use crate::proto;

impl From<proto::Item> for Item {
    fn from(item: proto::Item) -> Self {
        Item {
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}

impl From<Item> for proto::Item {
    fn from(item: Item) -> Self {
        proto::Item {
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}

impl From<Vec<Item>> for proto::Items {
    fn from(items: Vec<Item>) -> Self {
        proto::Items {
            items: items.into_iter().map(proto::Item::from).collect(),
        }
    }
}

impl From<proto::Items> for Vec<Item> {
    fn from(items: proto::Items) -> Self {
        items.items.into_iter().map(Item::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use inventory::seed_items;

    use super::*;

    #[test]
    fn items_keep_their_order() {
        let wire = proto::Items::from(seed_items());
        assert_eq!(wire.items[0].id, "001");
        assert_eq!(wire.items[2].name, "Third Item");
        assert_eq!(Vec::<Item>::from(wire), seed_items());
    }

    #[test]
    fn empty_fields_survive() {
        let item = Item::new("", "", "");
        assert_eq!(Item::from(proto::Item::from(item.clone())), item);
    }
}
