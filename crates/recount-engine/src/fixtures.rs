//! Test-only domain types and their registered metadata.
//!
//! A small bestiary of shapes the engine must handle: plain tracked
//! fields, only-annotated types, traversable collections with and without
//! association overrides, parent/child links (including a cyclic
//! parent/child graph), a pure join entity, and entity-valued scalar
//! fields labeled through a descriptive property.

use std::sync::{Arc, Weak};

use recount_metadata::{
    AuditHandle, Auditable, FieldDescriptor, MetadataRegistry, Property, TypeDescriptor,
};
use recount_types::EventKind;

pub(crate) struct Employee {
    pub boss: Option<Arc<AssociatedBoss>>,
    pub id: Option<String>,
    pub name: String,
}

impl Auditable for Employee {
    fn type_name(&self) -> &str {
        "Employee"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "boss" => Some(Property::entity_opt(
                self.boss.clone().map(|b| b as AuditHandle),
            )),
            "id" => Some(Property::scalar_opt(self.id.as_ref())),
            "name" => Some(Property::scalar(&self.name)),
            _ => None,
        }
    }
}

pub(crate) struct Boss {
    pub name: String,
    pub employees: Vec<Arc<Employee>>,
}

impl Auditable for Boss {
    fn type_name(&self) -> &str {
        "Boss"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar(&self.name)),
            "employees" => Some(Property::collection(
                self.employees.iter().map(|e| e.clone() as AuditHandle).collect(),
            )),
            _ => None,
        }
    }
}

pub(crate) struct AssociatedBoss {
    pub name: String,
    pub employees: Vec<Arc<Employee>>,
}

impl Auditable for AssociatedBoss {
    fn type_name(&self) -> &str {
        "AssociatedBoss"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar(&self.name)),
            "employees" => Some(Property::collection(
                self.employees.iter().map(|e| e.clone() as AuditHandle).collect(),
            )),
            _ => None,
        }
    }
}

pub(crate) struct Bun {
    pub id: Option<i64>,
    pub hot_dogs: Vec<Arc<HotDog>>,
}

impl Auditable for Bun {
    fn type_name(&self) -> &str {
        "Bun"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "id" => Some(Property::scalar_opt(self.id.as_ref())),
            "hot_dogs" => Some(Property::collection(
                self.hot_dogs.iter().map(|h| h.clone() as AuditHandle).collect(),
            )),
            _ => None,
        }
    }
}

/// Holds its parent weakly: the bun owns its hot dogs, each hot dog
/// points back at its bun.
pub(crate) struct HotDog {
    pub id: Option<i64>,
    pub bun: Weak<Bun>,
}

impl Auditable for HotDog {
    fn type_name(&self) -> &str {
        "HotDog"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "id" => Some(Property::scalar_opt(self.id.as_ref())),
            "bun" => Some(Property::entity_opt(
                self.bun.upgrade().map(|b| b as AuditHandle),
            )),
            _ => None,
        }
    }
}

pub(crate) struct Student {
    pub name: String,
}

impl Auditable for Student {
    fn type_name(&self) -> &str {
        "Student"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar(&self.name)),
            _ => None,
        }
    }
}

pub(crate) struct Course {
    pub name: String,
}

impl Auditable for Course {
    fn type_name(&self) -> &str {
        "Course"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar(&self.name)),
            _ => None,
        }
    }
}

pub(crate) struct Enrollment {
    pub student: Arc<Student>,
    pub course: Arc<Course>,
}

impl Auditable for Enrollment {
    fn type_name(&self) -> &str {
        "Enrollment"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "student" => Some(Property::entity(self.student.clone())),
            "course" => Some(Property::entity(self.course.clone())),
            _ => None,
        }
    }
}

pub(crate) struct SimpleExample {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: i64,
}

impl Auditable for SimpleExample {
    fn type_name(&self) -> &str {
        "SimpleExample"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar_opt(self.name.as_ref())),
            "description" => Some(Property::scalar_opt(self.description.as_ref())),
            "amount" => Some(Property::scalar(self.amount)),
            _ => None,
        }
    }
}

pub(crate) struct Owner {
    pub name: String,
}

impl Auditable for Owner {
    fn type_name(&self) -> &str {
        "Owner"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar(&self.name)),
            _ => None,
        }
    }
}

pub(crate) struct Dog {
    pub name: String,
    pub owner: Option<Arc<Owner>>,
}

impl Auditable for Dog {
    fn type_name(&self) -> &str {
        "Dog"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar(&self.name)),
            "owner" => Some(Property::entity_opt(
                self.owner.clone().map(|o| o as AuditHandle),
            )),
            _ => None,
        }
    }
}

pub(crate) struct Kennel {
    pub dog: Option<Arc<Dog>>,
}

impl Auditable for Kennel {
    fn type_name(&self) -> &str {
        "Kennel"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "dog" => Some(Property::entity_opt(
                self.dog.clone().map(|d| d as AuditHandle),
            )),
            _ => None,
        }
    }
}

/// One field whose typed representation varies but whose string form may
/// not.
pub(crate) enum Reading {
    Int(i64),
    Text(String),
}

pub(crate) struct Meter {
    pub reading: Reading,
}

impl Auditable for Meter {
    fn type_name(&self) -> &str {
        "Meter"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "reading" => Some(match &self.reading {
                Reading::Int(i) => Property::scalar(i),
                Reading::Text(t) => Property::Scalar(t.clone()),
            }),
            _ => None,
        }
    }
}

pub(crate) struct Item {
    pub id: u32,
    pub score: u32,
}

impl Auditable for Item {
    fn type_name(&self) -> &str {
        "Item"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "id" => Some(Property::scalar(self.id)),
            "score" => Some(Property::scalar(self.score)),
            _ => None,
        }
    }
}

pub(crate) struct Shelf {
    pub name: String,
    pub items: Vec<Arc<Item>>,
}

impl Auditable for Shelf {
    fn type_name(&self) -> &str {
        "Shelf"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar(&self.name)),
            "items" => Some(Property::collection(
                self.items.iter().map(|i| i.clone() as AuditHandle).collect(),
            )),
            _ => None,
        }
    }
}

/// Registered but flagged ignore.
pub(crate) struct Phantom;

impl Auditable for Phantom {
    fn type_name(&self) -> &str {
        "Phantom"
    }

    fn property(&self, _name: &str) -> Option<Property> {
        None
    }
}

/// Never registered at all.
pub(crate) struct Stray {
    pub name: String,
}

impl Auditable for Stray {
    fn type_name(&self) -> &str {
        "Stray"
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::scalar(&self.name)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------

pub(crate) fn employee(id: &str, name: &str) -> Employee {
    Employee {
        boss: None,
        id: Some(id.to_string()),
        name: name.to_string(),
    }
}

pub(crate) fn boss(name: &str, employees: Vec<Arc<Employee>>) -> Boss {
    Boss {
        name: name.to_string(),
        employees,
    }
}

pub(crate) fn associated_boss(name: &str, employees: Vec<Arc<Employee>>) -> AssociatedBoss {
    AssociatedBoss {
        name: name.to_string(),
        employees,
    }
}

pub(crate) fn enrollment(student: &str, course: &str) -> Enrollment {
    Enrollment {
        student: Arc::new(Student {
            name: student.to_string(),
        }),
        course: Arc::new(Course {
            name: course.to_string(),
        }),
    }
}

pub(crate) fn simple_example(
    name: Option<&str>,
    description: Option<&str>,
    amount: i64,
) -> SimpleExample {
    SimpleExample {
        name: name.map(str::to_string),
        description: description.map(str::to_string),
        amount,
    }
}

pub(crate) fn item(id: u32, score: u32) -> Item {
    Item { id, score }
}

pub(crate) fn shelf(name: &str, items: Vec<Arc<Item>>) -> Shelf {
    Shelf {
        name: name.to_string(),
        items,
    }
}

/// A bun holding one hot dog that points back at it.
pub(crate) fn bun_with_hot_dog(bun_id: i64, hot_dog_id: i64) -> Arc<Bun> {
    Arc::new_cyclic(|bun: &Weak<Bun>| Bun {
        id: Some(bun_id),
        hot_dogs: vec![Arc::new(HotDog {
            id: Some(hot_dog_id),
            bun: bun.clone(),
        })],
    })
}

/// The registry every engine test resolves against.
pub(crate) fn registry() -> Arc<MetadataRegistry> {
    let mut registry = MetadataRegistry::new();

    registry.register(
        TypeDescriptor::new("Employee")
            .descriptive_property("name")
            .id_property("id")
            .parent("boss", "employees")
            .field(FieldDescriptor::new("boss").ignored())
            .field(FieldDescriptor::new("id"))
            .field(FieldDescriptor::new("name").audited()),
    );
    registry.register(
        TypeDescriptor::new("Boss")
            .descriptive_property("name")
            .field(FieldDescriptor::new("name").audited())
            .field(
                FieldDescriptor::new("employees")
                    .traverse()
                    .descriptive_property("name"),
            ),
    );
    registry.register(
        TypeDescriptor::new("AssociatedBoss")
            .display_name("Big Boss")
            .descriptive_property("name")
            .field(FieldDescriptor::new("name").audited())
            .field(
                FieldDescriptor::new("employees")
                    .traverse()
                    .descriptive_property("name")
                    .add_event(EventKind::Associate)
                    .remove_event(EventKind::Disassociate),
            ),
    );
    registry.register(
        TypeDescriptor::new("Bun")
            .field(FieldDescriptor::new("id"))
            .field(FieldDescriptor::new("hot_dogs").traverse()),
    );
    registry.register(
        TypeDescriptor::new("HotDog")
            .parent("bun", "hot_dogs")
            .field(FieldDescriptor::new("id"))
            .field(FieldDescriptor::new("bun")),
    );
    registry.register(
        TypeDescriptor::new("Student")
            .descriptive_property("name")
            .field(FieldDescriptor::new("name").audited()),
    );
    registry.register(
        TypeDescriptor::new("Course")
            .descriptive_property("name")
            .field(FieldDescriptor::new("name").audited()),
    );
    registry.register(TypeDescriptor::new("Enrollment").join("student", "course"));
    registry.register(
        TypeDescriptor::new("SimpleExample")
            .display_name("example")
            .descriptive_property("name")
            .only_annotated()
            .field(FieldDescriptor::new("name").display_name("First name"))
            .field(FieldDescriptor::new("description").display_name("Description"))
            .field(FieldDescriptor::new("amount")),
    );
    registry.register(
        TypeDescriptor::new("Owner")
            .field(FieldDescriptor::new("name").audited()),
    );
    registry.register(
        TypeDescriptor::new("Dog")
            .field(FieldDescriptor::new("name").audited())
            .field(FieldDescriptor::new("owner").descriptive_property("name")),
    );
    registry.register(
        TypeDescriptor::new("Kennel").field(FieldDescriptor::new("dog").traverse()),
    );
    registry.register(TypeDescriptor::new("Meter").field(FieldDescriptor::new("reading")));
    registry.register(
        TypeDescriptor::new("Item")
            .field(FieldDescriptor::new("id"))
            .field(FieldDescriptor::new("score")),
    );
    registry.register(
        TypeDescriptor::new("Shelf")
            .descriptive_property("name")
            .field(FieldDescriptor::new("name").audited())
            .field(FieldDescriptor::new("items").traverse()),
    );
    registry.register(TypeDescriptor::new("Phantom").ignore());

    Arc::new(registry)
}
