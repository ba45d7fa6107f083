pub mod catalog;
pub mod coercion;
pub mod descriptor;
pub mod filter;
pub mod manager;
pub mod modal;
pub mod view;

pub use catalog::Catalog;
pub use coercion::FormDraft;
pub use descriptor::{Descriptor, EntityKind, FilterKind, FormMode, IdentityKey};
pub use filter::{Filter, FilterState, Scope};
pub use manager::EntityManager;
pub use modal::{Modal, ModalKind, Phase};
pub use view::{Body, Cell, Control, FormView, ListView};
