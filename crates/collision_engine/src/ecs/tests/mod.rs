//! Multi-tick collision scenarios driven through the ECS world
