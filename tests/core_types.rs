use templocate::{ImageView, LocateError, OwnedImage, Template, TemplatePlan};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        LocateError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        LocateError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        LocateError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, LocateError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn strided_view_copies_into_contiguous_template() {
    // Two rows of width 3 padded to stride 5.
    let data = [1u8, 2, 3, 99, 99, 4, 5, 6, 99, 99];
    let view = ImageView::new(&data, 3, 2, 5).unwrap();
    assert_eq!(view.row(1).unwrap(), &[4u8, 5, 6]);
    assert!(view.get(3, 0).is_none());

    let template = Template::from_view(view).unwrap();
    assert_eq!((template.width(), template.height()), (3, 2));
    assert_eq!(template.view().stride(), 3);
    assert_eq!(template.view().row(1).unwrap(), &[4u8, 5, 6]);
}

#[test]
fn owned_image_requires_exact_length() {
    assert!(OwnedImage::new(vec![0u8; 6], 3, 2).is_ok());
    assert_eq!(
        OwnedImage::new(vec![0u8; 5], 3, 2).unwrap_err(),
        LocateError::BufferTooSmall { needed: 6, got: 5 }
    );
    assert_eq!(
        OwnedImage::new(vec![0u8; 7], 3, 2).unwrap_err(),
        LocateError::InvalidDimensions {
            width: 3,
            height: 2,
        }
    );
}

#[test]
fn template_plan_matches_known_stats() {
    let tpl = Template::new(vec![0u8, 1, 2, 3], 2, 2).unwrap();
    let plan = TemplatePlan::from_view(tpl.view()).unwrap();

    assert_eq!(plan.width(), 2);
    assert_eq!(plan.height(), 2);
    assert_eq!(plan.len(), 4);
    assert!(!plan.is_flat());
    assert!((plan.mean() - 1.5).abs() < 1e-6);
    assert!((plan.var_t() - 5.0).abs() < 1e-6);

    let expected = [-1.5f32, -0.5, 0.5, 1.5];
    for (value, expected) in plan.t_prime().iter().zip(expected.iter()) {
        assert!((value - expected).abs() < 1e-6);
    }
}

#[test]
fn template_plan_marks_flat_templates() {
    let tpl = Template::new(vec![5u8; 4], 2, 2).unwrap();
    let plan = tpl.plan().unwrap();
    assert!(plan.is_flat());
    assert_eq!(plan.var_t(), 0.0);
    assert_eq!(plan.mean(), 5.0);
}
