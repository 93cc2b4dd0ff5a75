//! Property tests over generated job records

use super::globals::{
    CLANG, CLANG_CUDA, GCC, HIPCC, NVCC, OFF, TEST_COMPILE_ONLY, TEST_RUNTIME,
};
use super::*;
use proptest::prelude::*;

fn device_and_backends() -> impl Strategy<Value = (ParameterValue, ParameterValue, Option<String>, Option<String>)> {
    prop_oneof![
        prop::sample::select(vec!["10", "11", "12"]).prop_map(|v| (
            ParameterValue::new(GCC, v),
            ParameterValue::new(GCC, v),
            None,
            None,
        )),
        prop::sample::select(vec!["14", "15"]).prop_map(|v| (
            ParameterValue::new(CLANG, v),
            ParameterValue::new(CLANG, v),
            None,
            None,
        )),
        (
            prop::sample::select(vec!["11.0", "11.2", "12.1"]),
            prop::sample::select(vec![GCC, CLANG]),
        )
            .prop_map(|(cuda, host)| (
                ParameterValue::new(host, "11"),
                ParameterValue::new(NVCC, cuda),
                Some(cuda.to_string()),
                None,
            )),
        prop::sample::select(vec!["11.5", "12.0"]).prop_map(|cuda| (
            ParameterValue::new(CLANG_CUDA, "15"),
            ParameterValue::new(CLANG_CUDA, "15"),
            Some(cuda.to_string()),
            None,
        )),
        prop::sample::select(vec!["5.0", "5.3", "9.9"]).prop_map(|hip| (
            ParameterValue::new(HIPCC, hip),
            ParameterValue::new(HIPCC, hip),
            None,
            Some(hip.to_string()),
        )),
    ]
}

fn job_record() -> impl Strategy<Value = JobRecord> {
    (
        device_and_backends(),
        prop::sample::select(vec!["Release", "Debug"]),
        prop::sample::select(vec![TEST_RUNTIME, TEST_COMPILE_ONLY]),
        prop::sample::select(vec!["3.22", "3.25"]),
        prop::sample::select(vec!["1.79", "1.81"]),
        prop::sample::select(vec!["20.04", "22.04"]),
        prop::option::of(prop::sample::select(vec!["17", "20"])),
    )
        .prop_map(
            |((host, device, cuda, hip), build_type, test_type, cmake, boost, ubuntu, cxx)| {
                let mut record = JobRecord::new(
                    host,
                    device,
                    ParameterValue::new("build_type", build_type),
                    ParameterValue::new("test_type", test_type),
                )
                .with(Category::Cmake, ParameterValue::new("cmake", cmake))
                .with(Category::Boost, ParameterValue::new("boost", boost))
                .with(Category::Ubuntu, ParameterValue::new("ubuntu", ubuntu));
                if let Some(cxx) = cxx {
                    record = record.with(
                        Category::CxxStandard,
                        ParameterValue::new("cxx_standard", cxx),
                    );
                }
                for (backend, version) in [(Backend::GpuCuda, cuda), (Backend::GpuHip, hip)] {
                    let version = version.unwrap_or_else(|| OFF.to_string());
                    record = record.with(
                        Category::Backend(backend),
                        ParameterValue::new(backend.flag(), version),
                    );
                }
                record
            },
        )
}

proptest! {
    #[test]
    fn prop_job_is_deterministic(record in job_record()) {
        let version = ContainerVersion::new(1.0).unwrap();
        let first = JobDescriptor::build(&record, version, "stage0").unwrap();
        let second = JobDescriptor::build(&record.clone(), version, "stage0").unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_variables_never_empty(record in job_record()) {
        let variables = job_variables(&record).unwrap();
        prop_assert!(variables.values().all(|value| !value.is_empty()));
    }

    #[test]
    fn prop_tags_are_one_of_three_sets(record in job_record()) {
        let tags = job_tags(&record).tags();
        let allowed = [
            vec!["x86_64", "cpuonly"],
            vec!["x86_64", "cuda"],
            vec!["x86_64", "rocm"],
        ];
        prop_assert!(allowed.iter().any(|set| *set == tags));
        if record.is_compile_only() {
            prop_assert_eq!(job_tags(&record), RunnerClass::CpuOnly);
        }
    }

    #[test]
    fn prop_image_has_at_most_one_gpu_segment(record in job_record()) {
        let image = job_image(&record, ContainerVersion::new(2.0).unwrap()).unwrap();
        prop_assert!(image.ends_with(":2.0"));
        prop_assert!(!(image.contains("-cuda") && image.contains("-rocm")));
    }
}
