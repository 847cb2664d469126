//! Shared fixtures for the integration tests, built entirely through the public
//! API: schema-described classes covering models, entities, nested plain data,
//! constructors and methods.

#![allow(dead_code)]

use std::sync::OnceLock;

use protean::impl_reflect;
use protean::schema::{ClassSchema, ReflectClass};

/// Nested plain data on the model side.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContactCard {
    pub street: String,
    pub city: String,
}

impl ReflectClass for ContactCard {
    const NAME: &'static str = "ContactCard";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<ContactCard>(Self::NAME)
                .with_default()
                .property_rw("Street", |c: &ContactCard| c.street.clone(), |c, v| {
                    c.street = v;
                })
                .property_rw("City", |c: &ContactCard| c.city.clone(), |c, v| c.city = v)
                .build()
        })
    }
}

impl_reflect!(ContactCard);

/// Nested plain data on the entity side; shares `City` with [`ContactCard`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContactInfo {
    pub city: String,
}

impl ReflectClass for ContactInfo {
    const NAME: &'static str = "ContactInfo";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<ContactInfo>(Self::NAME)
                .with_default()
                .property_rw("City", |c: &ContactInfo| c.city.clone(), |c, v| c.city = v)
                .build()
        })
    }
}

impl_reflect!(ContactInfo);

/// The model side of the customer mapping scenario.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub country_id: i32,
    pub home: ContactCard,
}

impl ReflectClass for Customer {
    const NAME: &'static str = "Customer";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<Customer>(Self::NAME)
                .with_default()
                .property_rw("Name", |c: &Customer| c.name.clone(), |c, v| c.name = v)
                .property_rw("Email", |c: &Customer| c.email.clone(), |c, v| c.email = v)
                .property_rw(
                    "CountryId",
                    |c: &Customer| c.country_id,
                    |c, v| c.country_id = v,
                )
                .property_rw("Home", |c: &Customer| c.home.clone(), |c, v| c.home = v)
                .build()
        })
    }
}

impl_reflect!(Customer);

/// The persisted-entity side: nullable foreign key, read-only revision, and a
/// nested class of a different type than the model's.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CustomerRecord {
    pub name: String,
    pub email: String,
    pub country_id: Option<i32>,
    pub revision: i64,
    pub home: ContactInfo,
}

impl ReflectClass for CustomerRecord {
    const NAME: &'static str = "CustomerRecord";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<CustomerRecord>(Self::NAME)
                .entity()
                .with_default()
                .property_rw("Name", |c: &CustomerRecord| c.name.clone(), |c, v| {
                    c.name = v;
                })
                .property_rw("Email", |c: &CustomerRecord| c.email.clone(), |c, v| {
                    c.email = v;
                })
                .property_rw(
                    "CountryId",
                    |c: &CustomerRecord| c.country_id,
                    |c, v| c.country_id = v,
                )
                .property("Revision", |c: &CustomerRecord| c.revision)
                .property_rw("Home", |c: &CustomerRecord| c.home.clone(), |c, v| {
                    c.home = v;
                })
                .build()
        })
    }
}

impl_reflect!(CustomerRecord);

/// Constructor and method host for the invocation scenarios.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub total: f64,
}

impl Invoice {
    fn apply_rebate(&mut self, percent: f64) -> f64 {
        self.total -= self.total * percent / 100.0;
        self.total
    }
}

impl ReflectClass for Invoice {
    const NAME: &'static str = "Invoice";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<Invoice>(Self::NAME)
                .with_default()
                .property_rw("Number", |i: &Invoice| i.number.clone(), |i, v| {
                    i.number = v;
                })
                .property_rw("Total", |i: &Invoice| i.total, |i, v| i.total = v)
                .constructor2(|number: String, total: f64| Invoice { number, total })
                .method1("ApplyRebate", Invoice::apply_rebate)
                .build()
        })
    }
}

impl_reflect!(Invoice);
