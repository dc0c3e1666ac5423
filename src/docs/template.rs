//! Canned documentation content
//!
//! Generation does not analyze the selected file: every run resolves to
//! this fixed Markdown document.

pub const DOCUMENTATION_TEMPLATE: &str = r#"# Sample Project

This is a mock file content. In a real app, this would be the actual content of the file
from the GitHub repository.

## Getting Started

1. Clone the repository
2. Install dependencies
3. Run the development server

## Features

- Feature 1: Lorem ipsum dolor sit amet
- Feature 2: Consectetur adipiscing elit
- Feature 3: Sed do eiusmod tempor incididunt ut labore

## Code Example

```typescript
const App = () => {
  return (
    <div>
      <h1>Hello World!</h1>
    </div>
  );
};
```

## API Reference

| Endpoint | Method | Description |
|----------|--------|-------------|
| /api/users | GET | Get all users |
| /api/users/:id | GET | Get user by ID |
| /api/projects | POST | Create a new project |"#;

/// Documentation produced for a generation request
pub fn generate(_file_path: &str) -> String {
    DOCUMENTATION_TEMPLATE.to_string()
}
