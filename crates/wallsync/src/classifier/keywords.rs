use crate::config::schema::CategoryRule;

fn rule(category: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        category: category.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        tags: Vec::new(),
    }
}

fn pinned_rule(category: &str, keyword: &str, tags: &[&str]) -> CategoryRule {
    CategoryRule {
        category: category.to_string(),
        keywords: vec![keyword.to_string()],
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Built-in category keyword map. The order is part of the contract: the
/// classifier assigns the first rule with a matching keyword, so earlier
/// categories win ties. The trailing single-keyword rules carry fixed tag
/// lists and only apply when none of the main categories matched.
pub fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        rule(
            "风景",
            &[
                "自然", "山水", "海洋", "森林", "天空", "日落", "日出", "雪景", "春天", "夏天",
                "秋天", "冬天",
            ],
        ),
        rule("人物", &["美女", "帅哥", "明星", "模特", "艺术人像", "街拍", "写真"]),
        rule("动物", &["猫", "狗", "鸟", "野生动物", "宠物", "海洋生物"]),
        rule("建筑", &["城市", "建筑", "桥梁", "古建筑", "现代建筑", "夜景"]),
        rule("艺术", &["绘画", "插画", "抽象", "艺术", "创意", "设计"]),
        rule("科技", &["科幻", "未来", "机器人", "太空", "数码"]),
        rule("游戏", &["游戏", "动漫", "二次元", "角色"]),
        rule("汽车", &["跑车", "摩托车", "汽车", "交通工具"]),
        rule("美食", &["食物", "美食", "甜品", "饮品"]),
        rule("运动", &["体育", "运动", "健身", "球类"]),
        rule("其他", &["纹理", "通用", "简约", "抽象"]),
        pinned_rule("风景", "雨", &["雨天", "自然"]),
        pinned_rule("风景", "夜", &["夜景", "夜晚"]),
        pinned_rule("人物", "撑伞", &["雨天", "人物"]),
        pinned_rule("人物", "美女", &["美女", "人物"]),
        pinned_rule("艺术", "冷色", &["冷色调", "艺术"]),
        pinned_rule("科技", "废土", &["科幻", "废土"]),
        pinned_rule("风景", "地震", &["灾难", "自然"]),
        pinned_rule("科技", "巨物", &["科幻", "巨物"]),
        pinned_rule("建筑", "东京", &["城市", "日本"]),
        pinned_rule("游戏", "魔物", &["魔物", "奇幻"]),
        pinned_rule("人物", "国王", &["人物", "皇室"]),
    ]
}
