use std::path::PathBuf;

use rcg_core::ir::ServiceSpec;
use rcg_core::load::read_document;
use rcg_core::transform::{Parser, SpecNormalizer};
use rcg_core::{CodeGenerator, GeneratedFile};
use rcg_python_client::{PythonClientConfig, PythonClientGenerator};

fn blog() -> ServiceSpec {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../rcg-core/tests/fixtures/blog.yaml");
    let doc = read_document(&path).unwrap();
    let spec = SpecNormalizer::new().normalize(doc);
    Parser::default().parse(&spec, "blog", &[])
}

fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{path} was not generated"))
}

#[test]
fn blog_package_layout() {
    let files = PythonClientGenerator
        .generate(&blog(), &PythonClientConfig::default())
        .unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "blog/apis/posts_api.py",
            "blog/apis/users_api.py",
            "blog/apis/blogadmin_api.py",
            "blog/apis/default_api.py",
            "blog/apis/__init__.py",
            "blog/__init__.py",
            "blog/models/__init__.py",
        ]
    );

    let init = file(&files, "blog/__init__.py");
    assert!(init.contains("\"\"\"Blog API 2.4.0\"\"\""));
    assert!(init.contains("from .apis.blogadmin_api import BlogadminApi"));
    assert!(init.contains("from .apis.default_api import DefaultApi"));
}

#[test]
fn blog_posts_client() {
    let files = PythonClientGenerator
        .generate(&blog(), &PythonClientConfig::default())
        .unwrap();
    let posts = file(&files, "blog/apis/posts_api.py");

    assert!(posts.contains("class PostsApi:"));
    assert!(posts.contains("from ..models.api_models import (\n    CreatePostRequest,\n    Post,\n    CommonError,\n)"));

    // Query and header arguments with their defaults
    assert!(posts.contains("    def list_posts(\n        self,\n        *,\n        user_id: int,\n"));
    assert!(posts.contains("        page: int = 1,\n"));
    assert!(posts.contains("        x_request_id: str = \"\",\n"));
    assert!(posts.contains("\"userId\": user_id,"));

    // Array response carries no model
    let list_posts = posts.find("def list_posts(").unwrap();
    let create_post = posts.find("def create_post(").unwrap();
    assert!(posts[list_posts..create_post].contains(") -> httpx.Response:"));

    assert!(posts.contains("        body: CreatePostRequest,\n"));
    assert!(posts[create_post..].contains(") -> Post:"));
    assert!(posts.contains("    def get_post(\n        self,\n        post_id: str,\n        **kwargs: Any,\n"));
    assert!(posts.contains("f\"/posts/{post_id}\","));
}

#[test]
fn blog_multipart_client() {
    let files = PythonClientGenerator
        .generate(&blog(), &PythonClientConfig::default())
        .unwrap();
    let users = file(&files, "blog/apis/users_api.py");

    assert!(users.contains("    def upload_avatar(\n        self,\n        user_id: str,\n        *,\n        file: bytes,\n        caption: str | None = None,\n"));
    assert!(users.contains("files={key: value for key, value in form.items() if isinstance(value, bytes)},"));
    assert!(!users.contains("json="));
    assert!(!users.contains("api_models"));
}

#[test]
fn custom_templates_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("apis_init.py.j2"),
        "{% for api in api_names %}{{ api | to_pascal_case }};{% endfor %}",
    )
    .unwrap();

    let config = PythonClientConfig {
        async_mode: true,
        templates_dir: Some(dir.path().to_path_buf()),
        ..PythonClientConfig::default()
    };
    let files = PythonClientGenerator.generate(&blog(), &config).unwrap();

    assert_eq!(file(&files, "blog/__init__.py"), "Posts;Users;Blogadmin;Default;");
    assert!(file(&files, "blog/apis/posts_api.py").contains("    async def create_post("));
}
