//! Schema-described sample classes used across the unit tests.

use std::sync::OnceLock;

use crate::impl_reflect;
use crate::schema::{ClassSchema, ReflectClass};

/// Plain nested data holder on the "model" side.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

impl ReflectClass for Address {
    const NAME: &'static str = "Address";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<Address>(Self::NAME)
                .with_default()
                .property_rw("City", |a: &Address| a.city.clone(), |a, v| a.city = v)
                .property_rw("Zip", |a: &Address| a.zip.clone(), |a, v| a.zip = v)
                .build()
        })
    }
}

impl_reflect!(Address);

/// Plain nested data holder on the "entity" side; shares the `City` property name
/// with [`Address`] but is a different class.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Location {
    pub city: String,
}

impl ReflectClass for Location {
    const NAME: &'static str = "Location";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<Location>(Self::NAME)
                .with_default()
                .property_rw("City", |l: &Location| l.city.clone(), |l, v| l.city = v)
                .build()
        })
    }
}

impl_reflect!(Location);

/// The model side of the catalog mapping tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductModel {
    pub name: String,
    pub price: f64,
    pub category_id: i32,
    pub cost_price: f64,
    pub tags: Vec<String>,
    pub address: Address,
}

impl ReflectClass for ProductModel {
    const NAME: &'static str = "ProductModel";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<ProductModel>(Self::NAME)
                .with_default()
                .property_rw("Name", |p: &ProductModel| p.name.clone(), |p, v| p.name = v)
                .property_rw("Price", |p: &ProductModel| p.price, |p, v| p.price = v)
                .property_rw(
                    "CategoryId",
                    |p: &ProductModel| p.category_id,
                    |p, v| p.category_id = v,
                )
                .property_rw(
                    "CostPrice",
                    |p: &ProductModel| p.cost_price,
                    |p, v| p.cost_price = v,
                )
                .property_rw("Tags", |p: &ProductModel| p.tags.clone(), |p, v| p.tags = v)
                .property_rw(
                    "Address",
                    |p: &ProductModel| p.address.clone(),
                    |p, v| p.address = v,
                )
                .build()
        })
    }
}

impl_reflect!(ProductModel);

/// The persisted-entity side of the catalog mapping tests. `CategoryId` is
/// nullable and `CreatedOn` is read-only; `Address` is a [`Location`], not an
/// [`Address`], so mapping into it must recurse.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductEntity {
    pub name: String,
    pub price: f64,
    pub category_id: Option<i32>,
    pub created_on: i64,
    pub address: Location,
}

impl ReflectClass for ProductEntity {
    const NAME: &'static str = "ProductEntity";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<ProductEntity>(Self::NAME)
                .entity()
                .with_default()
                .property_rw("Name", |p: &ProductEntity| p.name.clone(), |p, v| p.name = v)
                .property_rw("Price", |p: &ProductEntity| p.price, |p, v| p.price = v)
                .property_rw(
                    "CategoryId",
                    |p: &ProductEntity| p.category_id,
                    |p, v| p.category_id = v,
                )
                .property("CreatedOn", |p: &ProductEntity| p.created_on)
                .property_rw(
                    "Address",
                    |p: &ProductEntity| p.address.clone(),
                    |p, v| p.address = v,
                )
                .build()
        })
    }
}

impl_reflect!(ProductEntity);

/// Non-entity destination with a nullable id column twin: the mapper's
/// foreign-key rule must not fire here.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CatalogRow {
    pub category_id: Option<i32>,
    pub stock: i32,
}

impl ReflectClass for CatalogRow {
    const NAME: &'static str = "CatalogRow";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<CatalogRow>(Self::NAME)
                .with_default()
                .property_rw(
                    "CategoryId",
                    |r: &CatalogRow| r.category_id,
                    |r, v| r.category_id = v,
                )
                .property_rw("Stock", |r: &CatalogRow| r.stock, |r, v| r.stock = v)
                .build()
        })
    }
}

impl_reflect!(CatalogRow);

/// Source shape with string-typed numbers, for the conversion paths.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CatalogInput {
    pub category_id: i32,
    pub stock: String,
}

impl ReflectClass for CatalogInput {
    const NAME: &'static str = "CatalogInput";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<CatalogInput>(Self::NAME)
                .with_default()
                .property_rw(
                    "CategoryId",
                    |i: &CatalogInput| i.category_id,
                    |i, v| i.category_id = v,
                )
                .property_rw("Stock", |i: &CatalogInput| i.stock.clone(), |i, v| i.stock = v)
                .build()
        })
    }
}

impl_reflect!(CatalogInput);

/// Base class for the member-hiding tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BaseItem {
    pub name: String,
    pub id: i32,
}

impl ReflectClass for BaseItem {
    const NAME: &'static str = "BaseItem";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<BaseItem>(Self::NAME)
                .with_default()
                .property_rw("Name", |b: &BaseItem| b.name.clone(), |b, v| b.name = v)
                .property_rw("Id", |b: &BaseItem| b.id, |b, v| b.id = v)
                .build()
        })
    }
}

impl_reflect!(BaseItem);

/// Derived class redeclaring `Name` (hiding the base member) and adding `Rating`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SpecialItem {
    pub base: BaseItem,
    pub name: String,
    pub rating: f64,
}

impl ReflectClass for SpecialItem {
    const NAME: &'static str = "SpecialItem";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<SpecialItem>(Self::NAME)
                .extends::<BaseItem>()
                .with_default()
                .property_rw("Name", |s: &SpecialItem| s.name.clone(), |s, v| s.name = v)
                .property_rw("Rating", |s: &SpecialItem| s.rating, |s, v| s.rating = v)
                .build()
        })
    }
}

impl_reflect!(SpecialItem, base = base);

/// Single parameterized constructor: the fast-path candidate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

impl ReflectClass for Money {
    const NAME: &'static str = "Money";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<Money>(Self::NAME)
                .with_default()
                .property_rw("Amount", |m: &Money| m.amount, |m, v| m.amount = v)
                .property_rw(
                    "Currency",
                    |m: &Money| m.currency.clone(),
                    |m, v| m.currency = v,
                )
                .constructor2(|amount: f64, currency: String| Money { amount, currency })
                .build()
        })
    }
}

impl_reflect!(Money);

/// Two parameterized constructors: overload selection requires an exact match.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Span {
    pub start: i64,
    pub length: i64,
}

impl ReflectClass for Span {
    const NAME: &'static str = "Span";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<Span>(Self::NAME)
                .with_default()
                .property_rw("Start", |s: &Span| s.start, |s, v| s.start = v)
                .property_rw("Length", |s: &Span| s.length, |s, v| s.length = v)
                .constructor1(|length: i64| Span { start: 0, length })
                .constructor2(|start: i64, length: i64| Span { start, length })
                .build()
        })
    }
}

impl_reflect!(Span);

/// Method host: a zero-parameter method, a one-parameter method and an
/// overloaded pair.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Counter {
    pub value: i32,
}

impl Counter {
    fn reset(&mut self) {
        self.value = 0;
    }

    fn increment(&mut self, by: i32) -> i32 {
        self.value += by;
        self.value
    }

    fn add(&mut self, a: i32) -> i32 {
        self.value += a;
        self.value
    }

    fn add2(&mut self, a: i32, b: i32) -> i32 {
        self.value += a + b;
        self.value
    }
}

impl ReflectClass for Counter {
    const NAME: &'static str = "Counter";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<Counter>(Self::NAME)
                .with_default()
                .property_rw("Value", |c: &Counter| c.value, |c, v| c.value = v)
                .method0("Reset", Counter::reset)
                .method1("Increment", Counter::increment)
                .method1("Add", Counter::add)
                .method2("Add", Counter::add2)
                .build()
        })
    }
}

impl_reflect!(Counter);
