//! Component trait and implementations

/// Marker trait for components
pub trait Component: 'static + Send + Sync {}

impl Component for crate::ecs::components::TransformComponent {}
impl Component for crate::ecs::components::MovementComponent {}

// Implement Component for collision components
impl Component for crate::ecs::components::ColliderComponent {}
impl Component for crate::ecs::components::CollisionStateComponent {}
