pub mod event;
pub mod funnel;
pub mod product;
pub mod profession;
pub mod session;
pub mod user;

pub use event::Entity as EventEntity;
pub use funnel::Entity as FunnelEntity;
pub use product::Entity as ProductEntity;
pub use profession::Entity as ProfessionEntity;
pub use session::Entity as SessionEntity;
pub use user::Entity as UserEntity;
