pub mod shared_workspace_service;
