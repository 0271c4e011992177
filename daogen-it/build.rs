fn main() {
    daogen_build::generate_daos()
        .scan_path("src/")
        .output_dir("src/generated")
        .module_path("crate::generated")
        .run()
        .expect("Failed to generate data-access modules");

    println!("cargo:rerun-if-changed=src/model");
}
