mod in_memory_task_repository;

pub use in_memory_task_repository::InMemoryTaskRepository;
